//! The rendering surface consumed by the interaction core.

use crate::brush::BrushConfig;
use crate::input::{Cursor, PointerEvent};
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Size, Vec2};

/// A 2D scene the mode controller, dispatcher and scene operations drive.
///
/// The surface owns every object, the background image, the pan offset and
/// the free-draw brush. Callers only ever compare object identities.
pub trait SceneSurface {
    /// Add an object on top of the scene.
    fn add(&mut self, shape: Shape);

    /// Remove an object, returning it if it was present.
    fn remove(&mut self, id: ShapeId) -> Option<Shape>;

    /// IDs of all objects, back to front, background image included.
    fn object_ids(&self) -> Vec<ShapeId>;

    /// Look up an object.
    fn get(&self, id: ShapeId) -> Option<&Shape>;

    /// Look up an object mutably.
    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape>;

    /// Repaint immediately.
    fn render_all(&mut self);

    /// Ask for a repaint on the next frame.
    fn request_render_all(&mut self);

    /// Pan the view by a delta in screen pixels.
    fn relative_pan(&mut self, delta: Vec2);

    fn set_cursor(&mut self, cursor: Cursor);

    fn cursor(&self) -> Cursor;

    /// Geometric center of the surface.
    fn center(&self) -> Point;

    fn size(&self) -> Size;

    /// Identity of the background image, if one is installed.
    fn background_image(&self) -> Option<ShapeId>;

    fn is_drawing_mode(&self) -> bool;

    fn set_drawing_mode(&mut self, enabled: bool);

    fn brush(&self) -> &BrushConfig;

    fn brush_mut(&mut self) -> &mut BrushConfig;

    /// Run the surface's built-in reaction to a raw pointer event
    /// (free-draw capture, click selection).
    fn handle_pointer(&mut self, event: &PointerEvent);

    /// Release the surface. Further calls must not panic.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;

    /// Number of objects, background included.
    fn len(&self) -> usize {
        self.object_ids().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `id` is the installed background image.
    fn is_background(&self, id: ShapeId) -> bool {
        self.background_image() == Some(id)
    }
}
