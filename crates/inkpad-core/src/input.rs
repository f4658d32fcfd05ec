//! Pointer events and pointer state.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Raw pointer event delivered by the host, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
    },
    Up {
        position: Point,
    },
    Move {
        position: Point,
        /// Raw movement since the previous platform event.
        movement: Vec2,
    },
}

impl PointerEvent {
    /// Build a move event from the previous and current pointer positions.
    pub fn moved(from: Point, to: Point) -> Self {
        PointerEvent::Move {
            position: to,
            movement: to - from,
        }
    }

    /// Position of the pointer when the event fired.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Up { position }
            | PointerEvent::Move { position, .. } => *position,
        }
    }

    /// Movement carried by a move event, zero for down/up.
    pub fn movement(&self) -> Vec2 {
        match self {
            PointerEvent::Move { movement, .. } => *movement,
            _ => Vec2::ZERO,
        }
    }
}

/// Whether the primary pointer is held down.
///
/// Written only by the pointer dispatcher; read by mode handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    pub pressed: bool,
}

/// Cursor shown over the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
}
