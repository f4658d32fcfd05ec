//! Group shape aggregating several shapes into one scene object.

use super::{Shape, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group of shapes that behaves as a single scene object.
///
/// Members keep their own identities; dissolving the group hands them back
/// unchanged, in their original order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub(crate) id: ShapeId,
    /// Member shapes, back to front.
    pub children: Vec<Shape>,
    /// Style properties (not directly used, but kept for consistency).
    style: ShapeStyle,
}

impl Group {
    /// Create a new group from a list of shapes.
    pub fn new(children: Vec<Shape>) -> Self {
        Self {
            id: Uuid::new_v4(),
            children,
            style: ShapeStyle::default(),
        }
    }

    /// Get the children of this group.
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// IDs of the direct members, in order.
    pub fn member_ids(&self) -> Vec<ShapeId> {
        self.children.iter().map(Shape::id).collect()
    }

    /// Look up a direct member.
    pub fn child(&self, id: ShapeId) -> Option<&Shape> {
        self.children.iter().find(|c| c.id() == id)
    }

    /// Look up a direct member mutably.
    pub fn child_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.children.iter_mut().find(|c| c.id() == id)
    }

    /// Dissolve this group and return its children.
    pub fn ungroup(self) -> Vec<Shape> {
        self.children
    }
}

impl ShapeTrait for Group {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.children
            .iter()
            .map(Shape::bounds)
            .reduce(|acc, b| acc.union(b))
            .unwrap_or(Rect::ZERO)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.children.iter().any(|c| c.hit_test(point, tolerance))
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn transform(&mut self, affine: Affine) {
        for child in &mut self.children {
            child.transform(affine);
        }
    }
}
