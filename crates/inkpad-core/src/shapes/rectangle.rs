//! Rectangle shape.

use super::{SerializableColor, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fill colors swapped in when a rectangle gains or loses selection focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusFill {
    /// Fill while not selected.
    pub idle: SerializableColor,
    /// Fill while selected.
    pub focused: SerializableColor,
}

/// A rectangle positioned by its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
    /// Optional fill toggle on selection.
    #[serde(default)]
    pub focus_fill: Option<FocusFill>,
}

impl Rectangle {
    /// Create a new rectangle centered on `center`.
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            width,
            height,
            style: ShapeStyle::default(),
            focus_fill: None,
        }
    }

    /// Attach a focus fill; the idle color is applied immediately.
    pub fn with_focus_fill(mut self, focus_fill: FocusFill) -> Self {
        self.style.fill_color = Some(focus_fill.idle);
        self.focus_fill = Some(focus_fill);
        self
    }

    /// Swap the fill for the focus state, if a focus fill is attached.
    pub fn set_focused(&mut self, focused: bool) {
        if let Some(fill) = self.focus_fill {
            self.style.fill_color = Some(if focused { fill.focused } else { fill.idle });
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_center_size(self.center, (self.width, self.height))
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        if self.style.fill_color.is_some() {
            // Filled: hit anywhere inside
            rect.inflate(tolerance, tolerance).contains(point)
        } else {
            // Outline only: hit on the border
            let band = tolerance + self.style.stroke_width / 2.0;
            let outer = rect.inflate(band, band);
            let inner = rect.inflate(-band, -band);
            outer.contains(point) && !inner.contains(point)
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.center = affine * self.center;
        // Note: rotation/skew is not supported
        let scale = affine.as_coeffs();
        self.width *= scale[0].abs();
        self.height *= scale[3].abs();
    }
}
