//! egui front-end components for the InkPad canvas.
//!
//! - **Toolbar**: mode buttons, group/ungroup/clear, brush selects, shape buttons
//! - **Canvas view**: paints a [`inkpad_core::Canvas`] and feeds it pointer input
//! - **Alert**: blocking error window
//! - **Buttons / colors / layout**: the styled building blocks the above use

pub mod alert;
pub mod buttons;
pub mod canvas_view;
pub mod colors;
pub mod layout;
pub mod toolbar;

pub use alert::Alert;
pub use buttons::{ActionButton, ToggleButton};
pub use canvas_view::CanvasView;
pub use colors::{to_color32, ColorSwatch};
pub use layout::{section_label, toolbar_frame, vertical_separator};
pub use toolbar::{apply_action, toolbar, UiAction};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Color swatch size
    pub const SWATCH: f32 = 12.0;
    /// Toolbar button height
    pub const BUTTON_HEIGHT: f32 = 24.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Destructive action color (red)
    pub const DANGER: Color32 = Color32::from_rgb(220, 38, 38);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
