//! In-memory scene surface.

use crate::brush::BrushConfig;
use crate::camera::Camera;
use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::input::{Cursor, PointerEvent};
use crate::shapes::{Freehand, Image, SerializableColor, Shape, ShapeId};
use crate::surface::SceneSurface;
use kurbo::{Point, Size, Vec2};
use std::collections::HashMap;

/// Tolerance (world units) used to simplify committed brush strokes.
const STROKE_SIMPLIFY_TOLERANCE: f64 = 0.5;

/// Shapes of a scene, keyed by ID, with their stacking order.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Send a shape to the back (bottommost).
    pub fn send_to_back(&mut self, id: ShapeId) {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.z_order.insert(0, id);
    }

    /// Find shapes at a point (in world coordinates), front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| {
                self.shapes
                    .get(&id)
                    .filter(|s| s.hit_test(point, tolerance))
                    .map(|_| id)
            })
            .collect()
    }

    /// Drop every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// A self-contained [`SceneSurface`] holding its scene in memory.
///
/// Beyond the surface contract it offers free drawing (strokes captured
/// from pointer events while the drawing flag is on), click selection with
/// focus notifications, and a render counter / pending-render flag the
/// front-end polls to decide when to repaint.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The shapes on the canvas.
    pub document: CanvasDocument,
    /// Camera for the pan transform.
    pub camera: Camera,
    size: Size,
    background_color: SerializableColor,
    background: Option<ShapeId>,
    brush: BrushConfig,
    drawing_mode: bool,
    cursor: Cursor,
    selection: Option<ShapeId>,
    /// Stroke being drawn, in world coordinates.
    stroke: Option<Vec<Point>>,
    render_count: u64,
    render_requested: bool,
    disposed: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Size::new(500.0, 500.0))
    }
}

impl Canvas {
    /// Create an empty canvas of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            document: CanvasDocument::new(),
            camera: Camera::new(),
            size,
            background_color: SerializableColor::white(),
            background: None,
            brush: BrushConfig::default(),
            drawing_mode: false,
            cursor: Cursor::Default,
            selection: None,
            stroke: None,
            render_count: 0,
            render_requested: false,
            disposed: false,
        }
    }

    /// Create a canvas sized, colored and brushed as configured.
    pub fn from_config(config: &CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;
        let mut canvas = Self::new(config.size());
        canvas.background_color = config.background()?;
        canvas.brush = config.default_brush()?;
        Ok(canvas)
    }

    /// Fill painted behind everything.
    pub fn background_color(&self) -> SerializableColor {
        self.background_color
    }

    /// Install `image` as the background, replacing any previous one.
    pub fn set_background_image(&mut self, image: Image) -> ShapeId {
        if let Some(old) = self.background.take() {
            self.document.remove_shape(old);
        }
        let shape = Shape::Image(image);
        let id = shape.id();
        self.document.add_shape(shape);
        self.document.send_to_back(id);
        self.background = Some(id);
        id
    }

    /// Shapes in paint order (back to front).
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.document.shapes_ordered()
    }

    /// The stroke being drawn, if any.
    pub fn active_stroke(&self) -> Option<&[Point]> {
        self.stroke.as_deref()
    }

    /// Currently selected object.
    pub fn selected(&self) -> Option<ShapeId> {
        self.selection
    }

    /// Select an object, moving focus from the previously selected one.
    pub fn select(&mut self, id: ShapeId) {
        if self.selection == Some(id) || !self.document.shapes.contains_key(&id) {
            return;
        }
        self.deselect();
        if let Some(shape) = self.document.get_shape_mut(id) {
            shape.set_focused(true);
        }
        self.selection = Some(id);
        log::trace!("Selected {id}");
        self.render_all();
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        if let Some(prev) = self.selection.take() {
            if let Some(shape) = self.document.get_shape_mut(prev) {
                shape.set_focused(false);
            }
            log::trace!("Deselected {prev}");
            self.render_all();
        }
    }

    /// Number of immediate repaints so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Consume a pending repaint request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    fn commit_stroke(&mut self) {
        let Some(points) = self.stroke.take() else {
            return;
        };
        if points.len() < 2 {
            return;
        }
        let mut stroke =
            Freehand::with_brush(points, self.brush.color, f64::from(self.brush.width));
        stroke.simplify(STROKE_SIMPLIFY_TOLERANCE);
        log::debug!("Committed brush stroke with {} points", stroke.len());
        self.document.add_shape(Shape::Freehand(stroke));
    }

    fn top_hit(&self, point: Point) -> Option<ShapeId> {
        self.document
            .shapes_at_point(point, 0.0)
            .into_iter()
            .find(|&id| Some(id) != self.background)
    }
}

impl SceneSurface for Canvas {
    fn add(&mut self, shape: Shape) {
        if self.disposed {
            log::warn!("Ignoring add on a disposed canvas");
            return;
        }
        self.document.add_shape(shape);
    }

    fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        if self.selection == Some(id) {
            self.deselect();
        }
        if self.background == Some(id) {
            self.background = None;
        }
        self.document.remove_shape(id)
    }

    fn object_ids(&self) -> Vec<ShapeId> {
        self.document.z_order.clone()
    }

    fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.document.get_shape(id)
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.document.get_shape_mut(id)
    }

    fn render_all(&mut self) {
        if self.disposed {
            return;
        }
        self.render_count += 1;
        self.render_requested = false;
    }

    fn request_render_all(&mut self) {
        if !self.disposed {
            self.render_requested = true;
        }
    }

    fn relative_pan(&mut self, delta: Vec2) {
        self.camera.pan(delta);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn background_image(&self) -> Option<ShapeId> {
        self.background
    }

    fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    fn set_drawing_mode(&mut self, enabled: bool) {
        if !enabled {
            // An unfinished stroke does not survive leaving free-draw
            self.stroke = None;
        } else if !self.drawing_mode {
            self.deselect();
        }
        self.drawing_mode = enabled;
    }

    fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    fn brush_mut(&mut self) -> &mut BrushConfig {
        &mut self.brush
    }

    fn handle_pointer(&mut self, event: &PointerEvent) {
        if self.disposed {
            return;
        }
        let world = self.camera.screen_to_world(event.position());

        if self.drawing_mode {
            match event {
                PointerEvent::Down { .. } => self.stroke = Some(vec![world]),
                PointerEvent::Move { .. } => {
                    if let Some(stroke) = &mut self.stroke {
                        stroke.push(world);
                        self.render_requested = true;
                    }
                }
                PointerEvent::Up { .. } => {
                    self.commit_stroke();
                    self.render_all();
                }
            }
        } else if let PointerEvent::Down { .. } = event {
            match self.top_hit(world) {
                Some(id) => self.select(id),
                None => self.deselect(),
            }
        }
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.document.clear();
        self.selection = None;
        self.background = None;
        self.stroke = None;
        self.drawing_mode = false;
        self.render_requested = false;
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
