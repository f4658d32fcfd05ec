//! Interaction modes and the controller that interprets pointer input.

use crate::input::{Cursor, PointerEvent, PointerState};
use crate::surface::SceneSurface;
use serde::{Deserialize, Serialize};

/// How pointer input on the canvas is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Plain selection; the surface handles clicks itself.
    #[default]
    Idle,
    /// Dragging pans the view.
    Pan,
    /// The surface's brush captures strokes.
    FreeDraw,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Idle, Mode::Pan, Mode::FreeDraw];

    /// Label shown on the mode's button.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idle => "NORMAL",
            Mode::Pan => "PAN",
            Mode::FreeDraw => "DRAWING",
        }
    }
}

/// Owns the active [`Mode`] and the pointer state its handlers read.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    pointer: PointerState,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Only the pointer dispatcher writes the pressed flag.
    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        self.pointer.pressed = pressed;
    }

    /// Switch to `mode`.
    ///
    /// Drawing is always switched off first and only switched back on when
    /// entering [`Mode::FreeDraw`]. Pointer state is left as is.
    pub fn set_mode<S: SceneSurface + ?Sized>(&mut self, mode: Mode, surface: &mut S) {
        surface.set_drawing_mode(false);
        if self.mode != mode {
            log::debug!("Mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        if mode == Mode::FreeDraw {
            surface.set_drawing_mode(true);
        }
    }

    /// Pointer moved.
    pub fn on_move<S: SceneSurface + ?Sized>(&self, event: &PointerEvent, surface: &mut S) {
        match self.mode {
            // The surface's own brush captures the stroke
            Mode::Idle | Mode::FreeDraw => {}
            Mode::Pan => {
                if !self.pointer.pressed {
                    return;
                }
                surface.set_cursor(Cursor::Grab);
                surface.render_all();
                let delta = event.movement();
                log::trace!("Pan by ({}, {})", delta.x, delta.y);
                surface.relative_pan(delta);
            }
        }
    }

    /// Primary button pressed.
    pub fn on_pointer_down<S: SceneSurface + ?Sized>(&self, surface: &mut S) {
        let cursor = match self.mode {
            Mode::Pan => Cursor::Grab,
            Mode::Idle | Mode::FreeDraw => Cursor::Default,
        };
        surface.set_cursor(cursor);
        surface.render_all();
    }

    /// Primary button released.
    pub fn on_pointer_up<S: SceneSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_cursor(Cursor::Default);
        surface.render_all();
    }
}
