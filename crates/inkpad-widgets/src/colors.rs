//! Color conversion and swatches.

use egui::{vec2, Color32, CornerRadius, Sense, Stroke, StrokeKind, Ui};
use inkpad_core::SerializableColor;

use crate::{sizing, theme};

/// Convert a core color to an egui color.
pub fn to_color32(color: SerializableColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Convert a core color to an egui color, scaled by `opacity`.
pub fn with_opacity(color: SerializableColor, opacity: f64) -> Color32 {
    let alpha = (f64::from(color.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

/// A small filled square showing a color.
pub struct ColorSwatch {
    color: Color32,
    size: f32,
}

impl ColorSwatch {
    pub fn new(color: SerializableColor) -> Self {
        Self {
            color: to_color32(color),
            size: sizing::SWATCH,
        }
    }

    /// Paint the swatch inline.
    pub fn show(self, ui: &mut Ui) {
        let (rect, _) = ui.allocate_exact_size(vec2(self.size, self.size), Sense::hover());
        if ui.is_rect_visible(rect) {
            let radius = CornerRadius::same(2);
            ui.painter().rect_filled(rect, radius, self.color);
            ui.painter().rect_stroke(
                rect,
                radius,
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Inside,
            );
        }
    }
}
