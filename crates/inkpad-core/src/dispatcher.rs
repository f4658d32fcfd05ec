//! Forwards raw pointer events to the active mode.

use crate::input::PointerEvent;
use crate::mode::ModeController;
use crate::surface::SceneSurface;

/// Deliver one pointer event to `controller`.
///
/// Down and up update the pressed flag before the mode sees them; moves are
/// forwarded as they are. Events are never buffered.
pub fn dispatch<S: SceneSurface + ?Sized>(
    controller: &mut ModeController,
    event: &PointerEvent,
    surface: &mut S,
) {
    match event {
        PointerEvent::Down { .. } => {
            controller.set_pressed(true);
            controller.on_pointer_down(surface);
        }
        PointerEvent::Up { .. } => {
            controller.set_pressed(false);
            controller.on_pointer_up(surface);
        }
        PointerEvent::Move { .. } => controller.on_move(event, surface),
    }
}
