//! Toolbar: modes, scene operations, brush selects and shape buttons.

use egui::Ui;
use inkpad_core::{
    CanvasResult, Mode, SceneSurface, SerializableColor, Session, ShapeKind,
};

use crate::buttons::{ActionButton, ToggleButton};
use crate::colors::ColorSwatch;
use crate::layout::{section_label, vertical_separator};

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    /// Switch interaction mode.
    SetMode(Mode),
    /// Group (`true`) or ungroup (`false`).
    Group(bool),
    /// Remove everything but the background.
    Clear,
    /// Drop in an animated shape.
    AddShape(ShapeKind),
    SetBrushColor(SerializableColor),
    SetBrushWidth(u32),
}

/// Render the toolbar row and return the action clicked this frame, if any.
pub fn toolbar<S: SceneSurface>(ui: &mut Ui, session: &Session<S>) -> Option<UiAction> {
    let mut action = None;
    let Some(surface) = session.surface() else {
        ui.label("Canvas disposed");
        return None;
    };
    let brush = *surface.brush();
    let options = session.brush_options();
    let grouped = session.active_group().is_some();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        for mode in Mode::ALL {
            if ToggleButton::new(mode.label(), session.mode() == mode)
                .min_width(64.0)
                .show(ui)
            {
                action = Some(UiAction::SetMode(mode));
            }
        }

        vertical_separator(ui);

        if ActionButton::new("GROUP").enabled(!grouped).show(ui) {
            action = Some(UiAction::Group(true));
        }
        if ActionButton::new("UNGROUP").enabled(grouped).show(ui) {
            action = Some(UiAction::Group(false));
        }
        if ActionButton::new("CLEAR").danger().show(ui) {
            action = Some(UiAction::Clear);
        }

        vertical_separator(ui);

        section_label(ui, "Color");
        let current = options.name_of(brush.color).unwrap_or("custom").to_string();
        egui::ComboBox::from_id_salt("brush_color")
            .selected_text(current)
            .show_ui(ui, |ui| {
                for entry in &options.colors {
                    let selected = entry.color == brush.color;
                    let clicked = ui
                        .horizontal(|ui| {
                            ColorSwatch::new(entry.color).show(ui);
                            ui.selectable_label(selected, &entry.display).clicked()
                        })
                        .inner;
                    if clicked {
                        action = Some(UiAction::SetBrushColor(entry.color));
                    }
                }
            });

        section_label(ui, "Width");
        egui::ComboBox::from_id_salt("brush_width")
            .selected_text(brush.width.to_string())
            .show_ui(ui, |ui| {
                for &width in &options.widths {
                    if ui
                        .selectable_label(width == brush.width, width.to_string())
                        .clicked()
                    {
                        action = Some(UiAction::SetBrushWidth(width));
                    }
                }
            });

        vertical_separator(ui);

        for kind in ShapeKind::ALL {
            if ActionButton::new(kind.label()).show(ui) {
                action = Some(UiAction::AddShape(kind));
            }
        }
    });

    action
}

/// Apply a toolbar action to the session.
pub fn apply_action<S: SceneSurface>(session: &mut Session<S>, action: UiAction) -> CanvasResult<()> {
    log::debug!("UI action {action:?}");
    match action {
        UiAction::SetMode(mode) => session.set_mode(mode),
        UiAction::Group(enable) => session.group(enable),
        UiAction::Clear => session.clear().map(|_| ()),
        UiAction::AddShape(kind) => session.add_shape(kind).map(|_| ()),
        UiAction::SetBrushColor(color) => session.set_brush_color(color),
        UiAction::SetBrushWidth(width) => session.set_brush_width(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::{CanvasConfig, CanvasError};

    fn session() -> Session<inkpad_core::Canvas> {
        Session::from_config(&CanvasConfig::default()).unwrap()
    }

    #[test]
    fn test_toolbar_renders_without_action() {
        let session = session();
        let ctx = egui::Context::default();
        let mut action = Some(UiAction::Clear);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = toolbar(ui, &session);
            });
        });
        assert_eq!(action, None);
    }

    #[test]
    fn test_apply_actions() {
        let mut session = session();

        apply_action(&mut session, UiAction::SetMode(Mode::FreeDraw)).unwrap();
        assert_eq!(session.mode(), Mode::FreeDraw);

        apply_action(&mut session, UiAction::AddShape(ShapeKind::Rectangle)).unwrap();
        apply_action(&mut session, UiAction::Group(true)).unwrap();
        assert!(session.active_group().is_some());
        apply_action(&mut session, UiAction::Group(false)).unwrap();

        apply_action(&mut session, UiAction::Clear).unwrap();
        assert!(session.surface().unwrap().is_empty());

        let blue = SerializableColor::rgb(0x00, 0x81, 0xa7);
        apply_action(&mut session, UiAction::SetBrushColor(blue)).unwrap();
        apply_action(&mut session, UiAction::SetBrushWidth(3)).unwrap();
        let brush = session.surface().unwrap().brush();
        assert_eq!(brush.color, blue);
        assert_eq!(brush.width, 3);
    }

    #[test]
    fn test_apply_surfaces_errors() {
        let mut session = session();
        let err = apply_action(&mut session, UiAction::Group(false)).unwrap_err();
        assert!(err.is_invalid_state());
        assert!(matches!(
            apply_action(&mut session, UiAction::SetBrushWidth(8)),
            Err(CanvasError::UnsupportedBrushWidth(8))
        ));
    }
}
