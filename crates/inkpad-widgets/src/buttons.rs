//! Button components: toggle buttons and plain action buttons.

use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, Sense, Ui};

use crate::{sizing, theme};

fn text_width(ui: &Ui, label: &str, font_id: &egui::FontId) -> f32 {
    ui.painter()
        .layout_no_wrap(label.to_string(), font_id.clone(), Color32::PLACEHOLDER)
        .size()
        .x
}

/// A toggle button with text label.
/// Uses solid blue background when selected.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    min_width: Option<f32>,
    font_size: f32,
}

impl<'a> ToggleButton<'a> {
    /// Create a new toggle button.
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            min_width: None,
            font_size: 11.0,
        }
    }

    /// Set minimum width.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(self.font_size);
        let text_width = text_width(ui, self.label, &font_id);
        let width = self.min_width.unwrap_or(0.0).max(text_width + 16.0);
        let (rect, response) =
            ui.allocate_exact_size(vec2(width, sizing::BUTTON_HEIGHT), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                Color32::from_gray(235)
            } else {
                Color32::from_gray(245)
            };

            let text_color = if self.selected {
                Color32::WHITE
            } else {
                Color32::from_gray(80)
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                font_id,
                text_color,
            );
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A one-shot button; `danger` paints the label red.
pub struct ActionButton<'a> {
    label: &'a str,
    danger: bool,
    enabled: bool,
}

impl<'a> ActionButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            danger: false,
            enabled: true,
        }
    }

    /// Mark the action as destructive.
    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Show the button and return true if clicked while enabled.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(11.0);
        let width = text_width(ui, self.label, &font_id) + 16.0;
        let (rect, response) =
            ui.allocate_exact_size(vec2(width, sizing::BUTTON_HEIGHT), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.enabled && response.hovered() {
                Color32::from_gray(235)
            } else {
                Color32::from_gray(245)
            };
            let text_color = match (self.enabled, self.danger) {
                (false, _) => Color32::from_gray(180),
                (true, true) => theme::DANGER,
                (true, false) => theme::TEXT,
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                font_id,
                text_color,
            );
        }

        let clicked = response.clicked();
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        self.enabled && clicked
    }
}
