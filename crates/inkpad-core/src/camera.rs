//! Camera module for the pan transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera holds the viewport offset of the canvas.
///
/// Panning is purely additive: applying two deltas in sequence is the same
/// as applying their sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
}

impl Camera {
    /// Create a new camera with no offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        screen_point - self.offset
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}
