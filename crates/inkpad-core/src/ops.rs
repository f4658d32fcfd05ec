//! Scene mutations: clear, add a shape, group and ungroup.
//!
//! The background image is never touched by any of these. At most one group
//! exists at a time and it always wraps every non-background object that was
//! on the surface when it was created.

use crate::animation::{AnimationHandle, AnimationTask, Animator, Easing, Tween};
use crate::error::{CanvasError, CanvasResult};
use crate::shapes::{
    Circle, FocusFill, Group, Rectangle, SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle,
};
use crate::surface::SceneSurface;
use kurbo::Point;
use std::time::Duration;

/// Top at which added shapes enter, just above the visible area.
pub const ENTRY_TOP: f64 = -50.0;
/// Length of each entrance stage.
pub const ENTRY_DURATION: Duration = Duration::from_millis(500);

pub const CIRCLE_RADIUS: f64 = 100.0;
pub const RECT_WIDTH: f64 = 200.0;
pub const RECT_HEIGHT: f64 = 100.0;

const BLUE: SerializableColor = SerializableColor::rgb(0, 0, 255);
const YELLOW: SerializableColor = SerializableColor::rgb(255, 255, 0);
const WHITE: SerializableColor = SerializableColor::rgb(255, 255, 255);

/// Reference to the aggregate created by [`group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupHandle {
    id: ShapeId,
}

impl GroupHandle {
    pub fn id(&self) -> ShapeId {
        self.id
    }
}

/// Remove every non-background object, back to front.
fn take_objects<S: SceneSurface + ?Sized>(surface: &mut S) -> Vec<Shape> {
    let ids: Vec<ShapeId> = surface
        .object_ids()
        .into_iter()
        .filter(|&id| !surface.is_background(id))
        .collect();
    ids.into_iter().filter_map(|id| surface.remove(id)).collect()
}

/// Remove every object except the background image.
///
/// Drops `active_group` if the aggregate was among the removed objects.
pub fn clear<S: SceneSurface + ?Sized>(
    surface: &mut S,
    active_group: &mut Option<GroupHandle>,
) -> Vec<Shape> {
    let removed = take_objects(surface);
    if active_group.is_some_and(|handle| removed.iter().any(|shape| shape.id() == handle.id)) {
        *active_group = None;
    }
    if !removed.is_empty() {
        log::debug!("Cleared {} objects", removed.len());
        surface.request_render_all();
    }
    removed
}

/// Add a shape of `kind` above the surface and animate it into view.
pub fn add_shape<S: SceneSurface + ?Sized>(
    kind: ShapeKind,
    surface: &mut S,
    animator: &mut Animator,
) -> (ShapeId, AnimationHandle) {
    let center = surface.center();
    let origin = Point::new(center.x, ENTRY_TOP);

    let (shape, stages) = match kind {
        ShapeKind::Circle => {
            let mut circle = Circle::new(origin, CIRCLE_RADIUS);
            circle.style = ShapeStyle::filled(BLUE);
            let floor = surface.size().height - 100.0;
            (
                Shape::Circle(circle),
                vec![
                    Tween::new(floor, ENTRY_DURATION, Easing::EaseInSine),
                    Tween::new(center.y, ENTRY_DURATION, Easing::EaseOutBounce),
                ],
            )
        }
        ShapeKind::Rectangle => {
            let mut rect = Rectangle::new(origin, RECT_WIDTH, RECT_HEIGHT);
            rect.style = ShapeStyle::filled(YELLOW);
            let rect = rect.with_focus_fill(FocusFill {
                idle: YELLOW,
                focused: WHITE,
            });
            (
                Shape::Rectangle(rect),
                vec![Tween::new(center.y, ENTRY_DURATION, Easing::Linear)],
            )
        }
    };

    let id = shape.id();
    surface.add(shape);
    surface.render_all();
    log::debug!("Added {} {id}", kind.label());

    let handle = animator.schedule(AnimationTask::new(id, stages));
    (id, handle)
}

/// Group (`true`) or ungroup (`false`) the scene.
pub fn group<S: SceneSurface + ?Sized>(
    enable: bool,
    surface: &mut S,
    active_group: &mut Option<GroupHandle>,
) -> CanvasResult<()> {
    if enable {
        group_objects(surface, active_group)
    } else {
        ungroup_objects(surface, active_group)
    }
}

fn group_objects<S: SceneSurface + ?Sized>(
    surface: &mut S,
    active_group: &mut Option<GroupHandle>,
) -> CanvasResult<()> {
    if active_group.is_some() {
        log::warn!("Group requested while a group already exists");
        return Err(CanvasError::InvalidState("a group already exists"));
    }
    let has_members = surface
        .object_ids()
        .into_iter()
        .any(|id| !surface.is_background(id));
    if !has_members {
        log::warn!("Group requested on an empty scene");
        return Err(CanvasError::InvalidState("nothing to group"));
    }

    let members = take_objects(surface);
    let group = Group::new(members);
    let id = group.id;
    log::debug!("Grouped {} objects into {id}", group.children.len());

    surface.add(Shape::Group(group));
    surface.request_render_all();
    *active_group = Some(GroupHandle { id });
    Ok(())
}

fn ungroup_objects<S: SceneSurface + ?Sized>(
    surface: &mut S,
    active_group: &mut Option<GroupHandle>,
) -> CanvasResult<()> {
    let Some(handle) = *active_group else {
        log::warn!("Ungroup requested without a group");
        return Err(CanvasError::InvalidState("no group to ungroup"));
    };

    let group = match surface.remove(handle.id) {
        Some(Shape::Group(group)) => group,
        Some(other) => {
            // Not ours; put it back untouched
            surface.add(other);
            *active_group = None;
            return Err(CanvasError::InvalidState("group handle does not name a group"));
        }
        None => {
            log::warn!("Group {} is no longer on the surface", handle.id);
            *active_group = None;
            return Err(CanvasError::InvalidState("group is no longer on the surface"));
        }
    };

    let members = group.ungroup();
    log::debug!("Ungrouped {} objects from {}", members.len(), handle.id);
    for member in members {
        surface.add(member);
    }
    surface.request_render_all();
    *active_group = None;
    Ok(())
}
