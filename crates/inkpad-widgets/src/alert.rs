//! Blocking alert window for user-facing errors.

use egui::{Align2, Color32, Context, CornerRadius, Frame, Margin, Pos2, Stroke, Vec2};
use inkpad_core::CanvasError;

use crate::buttons::ActionButton;

/// Holds at most one message; while it is shown a backdrop swallows input.
#[derive(Debug, Default)]
pub struct Alert {
    message: Option<String>,
}

impl Alert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `error` for display, replacing any pending message.
    pub fn report(&mut self, error: &CanvasError) {
        self.message = Some(error.to_string());
    }

    pub fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    /// Show the alert if one is pending.
    pub fn show(&mut self, ctx: &Context) {
        let Some(message) = self.message.clone() else {
            return;
        };

        // Backdrop
        egui::Area::new(egui::Id::new("inkpad_alert_backdrop"))
            .fixed_pos(Pos2::ZERO)
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                let screen_rect = ctx.input(|i| i.content_rect());
                ui.allocate_rect(screen_rect, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(80));
            });

        egui::Area::new(egui::Id::new("inkpad_alert"))
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                Frame::new()
                    .fill(Color32::WHITE)
                    .corner_radius(CornerRadius::same(12))
                    .stroke(Stroke::new(1.0, Color32::from_gray(200)))
                    .inner_margin(Margin::same(20))
                    .show(ui, |ui| {
                        ui.set_width(280.0);
                        ui.vertical(|ui| {
                            ui.label(
                                egui::RichText::new("Something went wrong")
                                    .size(16.0)
                                    .strong()
                                    .color(Color32::from_gray(30)),
                            );
                            ui.add_space(8.0);
                            ui.label(egui::RichText::new(message).color(Color32::from_gray(60)));
                            ui.add_space(12.0);
                            if ActionButton::new("OK").show(ui) {
                                self.message = None;
                            }
                        });
                    });
            });
    }
}
