//! Tick-driven tweens of a shape's vertical position.
//!
//! Nothing here owns a clock. The host calls [`Animator::tick`] with the
//! time elapsed since the previous frame; every task advances by that much
//! and the surface is repainted once if anything moved.

use crate::shapes::{Shape, ShapeId};
use crate::surface::SceneSurface;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

/// Easing curves available to tweens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    EaseInSine,
    EaseOutBounce,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInSine => 1.0 - (t * FRAC_PI_2).cos(),
            Easing::EaseOutBounce => ease_out_bounce(t),
        }
    }
}

fn ease_out_bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// One stage of an animation: move `top` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            to,
            duration,
            easing,
        }
    }
}

/// Identifies a scheduled task within one animator generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle {
    pub id: u64,
    pub generation: u64,
}

/// A queue of tweens applied to one shape, one stage after another.
#[derive(Debug, Clone)]
pub struct AnimationTask {
    target: ShapeId,
    stages: VecDeque<Tween>,
    /// Start value of the current stage, captured when the stage begins.
    from: Option<f64>,
    elapsed: Duration,
}

enum TaskStep {
    Moved,
    Finished,
    Orphaned,
}

impl AnimationTask {
    pub fn new(target: ShapeId, stages: impl IntoIterator<Item = Tween>) -> Self {
        Self {
            target,
            stages: stages.into_iter().collect(),
            from: None,
            elapsed: Duration::ZERO,
        }
    }

    fn advance<S: SceneSurface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> TaskStep {
        let Some(shape) = resolve_target(surface, self.target) else {
            return TaskStep::Orphaned;
        };

        // Time left over from a finished stage carries into the next one
        let mut budget = dt;
        while let Some(stage) = self.stages.front().copied() {
            let from = *self.from.get_or_insert_with(|| shape.top());
            let elapsed = self.elapsed + budget;

            if elapsed >= stage.duration {
                shape.set_top(stage.to);
                budget = elapsed - stage.duration;
                self.stages.pop_front();
                self.from = None;
                self.elapsed = Duration::ZERO;
            } else {
                let t = elapsed.as_secs_f64() / stage.duration.as_secs_f64();
                shape.set_top(from + (stage.to - from) * stage.easing.apply(t));
                self.elapsed = elapsed;
                return TaskStep::Moved;
            }
        }
        TaskStep::Finished
    }
}

/// Find `target` on the surface, or inside the group that absorbed it.
fn resolve_target<S: SceneSurface + ?Sized>(surface: &mut S, target: ShapeId) -> Option<&mut Shape> {
    let owner = if surface.get(target).is_some() {
        target
    } else {
        surface.object_ids().into_iter().find(|&id| {
            matches!(surface.get(id), Some(Shape::Group(group)) if group.child(target).is_some())
        })?
    };
    let shape = surface.get_mut(owner)?;
    if owner == target {
        return Some(shape);
    }
    match shape {
        Shape::Group(group) => group.child_mut(target),
        _ => None,
    }
}

/// Owns every in-flight animation task.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    tasks: Vec<(u64, AnimationTask)>,
    next_id: u64,
    generation: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` and return a handle to query it.
    pub fn schedule(&mut self, task: AnimationTask) -> AnimationHandle {
        let id = self.next_id;
        self.next_id += 1;
        log::trace!(
            "Scheduled animation {id} on {} ({} stages)",
            task.target,
            task.stages.len()
        );
        self.tasks.push((id, task));
        AnimationHandle {
            id,
            generation: self.generation,
        }
    }

    /// Check whether the task behind `handle` is still in flight.
    pub fn is_running(&self, handle: AnimationHandle) -> bool {
        handle.generation == self.generation && self.tasks.iter().any(|(id, _)| *id == handle.id)
    }

    pub fn is_animating(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Number of tasks in flight.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance every task by `dt`. Returns true if any shape moved.
    ///
    /// A target absorbed into a group keeps animating inside it. Tasks whose
    /// target left the surface are dropped without touching anything. A disposed surface drops all tasks.
    pub fn tick<S: SceneSurface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> bool {
        if self.tasks.is_empty() {
            return false;
        }
        if surface.is_disposed() {
            self.tasks.clear();
            return false;
        }

        let mut moved = false;
        self.tasks.retain_mut(|(id, task)| match task.advance(dt, &mut *surface) {
            TaskStep::Moved => {
                moved = true;
                true
            }
            TaskStep::Finished => {
                log::trace!("Animation {id} finished");
                moved = true;
                false
            }
            TaskStep::Orphaned => {
                log::trace!("Animation {id} lost its target");
                false
            }
        });

        if moved {
            surface.render_all();
        }
        moved
    }

    /// Drop every task and start a new generation.
    pub fn invalidate(&mut self) {
        self.tasks.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::shapes::{Circle, Group};
    use kurbo::Point;

    const EPS: f64 = 1e-9;

    fn linear(to: f64, millis: u64) -> Tween {
        Tween::new(to, Duration::from_millis(millis), Easing::Linear)
    }

    fn canvas_with_circle(top: f64) -> (Canvas, ShapeId) {
        let mut canvas = Canvas::default();
        let circle = Shape::Circle(Circle::new(Point::new(250.0, top), 100.0));
        let id = circle.id();
        canvas.add(circle);
        (canvas, id)
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInSine, Easing::EaseOutBounce] {
            assert!(easing.apply(0.0).abs() < EPS, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < EPS, "{easing:?} at 1");
        }
        assert!((Easing::Linear.apply(0.25) - 0.25).abs() < EPS);
        // Clamped outside the unit interval
        assert!((Easing::Linear.apply(2.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_bounce_overshoots_early() {
        // Bounce reaches the target before the first rebound
        assert!((Easing::EaseOutBounce.apply(1.0 / 2.75) - 1.0).abs() < EPS);
        assert!(Easing::EaseOutBounce.apply(0.5) < 1.0);
        assert!(Easing::EaseInSine.apply(0.5) < 0.5);
    }

    #[test]
    fn test_linear_tween_progress() {
        let (mut canvas, id) = canvas_with_circle(0.0);
        let mut animator = Animator::new();
        let handle = animator.schedule(AnimationTask::new(id, [linear(100.0, 500)]));

        assert!(animator.tick(Duration::from_millis(250), &mut canvas));
        assert!((canvas.get(id).unwrap().top() - 50.0).abs() < EPS);
        assert!(animator.is_running(handle));

        assert!(animator.tick(Duration::from_millis(250), &mut canvas));
        assert!((canvas.get(id).unwrap().top() - 100.0).abs() < EPS);
        assert!(!animator.is_running(handle));
        assert!(!animator.is_animating());
        assert_eq!(canvas.render_count(), 2);
    }

    #[test]
    fn test_stages_capture_start_when_they_begin() {
        let (mut canvas, id) = canvas_with_circle(-50.0);
        let mut animator = Animator::new();
        animator.schedule(AnimationTask::new(
            id,
            [linear(400.0, 500), linear(250.0, 500)],
        ));

        // Finish stage one exactly, then halfway into stage two
        animator.tick(Duration::from_millis(500), &mut canvas);
        assert!((canvas.get(id).unwrap().top() - 400.0).abs() < EPS);
        animator.tick(Duration::from_millis(250), &mut canvas);
        assert!((canvas.get(id).unwrap().top() - 325.0).abs() < EPS);
    }

    #[test]
    fn test_leftover_time_carries_into_next_stage() {
        let (mut canvas, id) = canvas_with_circle(0.0);
        let mut animator = Animator::new();
        animator.schedule(AnimationTask::new(
            id,
            [linear(100.0, 100), linear(200.0, 100)],
        ));

        animator.tick(Duration::from_millis(150), &mut canvas);
        assert!((canvas.get(id).unwrap().top() - 150.0).abs() < EPS);
    }

    #[test]
    fn test_missing_target_is_dropped_silently() {
        let (mut canvas, id) = canvas_with_circle(0.0);
        let mut animator = Animator::new();
        let handle = animator.schedule(AnimationTask::new(id, [linear(100.0, 500)]));

        canvas.remove(id);
        assert!(!animator.tick(Duration::from_millis(16), &mut canvas));
        assert!(!animator.is_running(handle));
        assert_eq!(canvas.render_count(), 0);
    }

    #[test]
    fn test_target_inside_group_keeps_moving() {
        let (mut canvas, id) = canvas_with_circle(0.0);
        let mut animator = Animator::new();
        let handle = animator.schedule(AnimationTask::new(id, [linear(100.0, 500)]));

        let member = canvas.remove(id).unwrap();
        let group = Group::new(vec![member]);
        let group_id = group.id;
        canvas.add(Shape::Group(group));

        assert!(animator.tick(Duration::from_millis(250), &mut canvas));
        assert!(animator.is_running(handle));
        let Some(Shape::Group(group)) = canvas.get(group_id) else {
            panic!("expected a group");
        };
        assert!((group.child(id).unwrap().top() - 50.0).abs() < EPS);
    }

    #[test]
    fn test_invalidate_bumps_generation() {
        let (mut canvas, id) = canvas_with_circle(0.0);
        let mut animator = Animator::new();
        let handle = animator.schedule(AnimationTask::new(id, [linear(100.0, 500)]));

        animator.invalidate();
        assert_eq!(animator.generation(), 1);
        assert!(!animator.is_running(handle));
        assert!(!animator.tick(Duration::from_millis(100), &mut canvas));
        assert!(canvas.get(id).unwrap().top().abs() < EPS);

        // New tasks live in the new generation
        let fresh = animator.schedule(AnimationTask::new(id, [linear(100.0, 500)]));
        assert_eq!(fresh.generation, 1);
        assert!(animator.is_running(fresh));
    }

    #[test]
    fn test_disposed_surface_drops_tasks() {
        let (mut canvas, id) = canvas_with_circle(0.0);
        let mut animator = Animator::new();
        animator.schedule(AnimationTask::new(id, [linear(100.0, 500)]));

        canvas.dispose();
        assert!(!animator.tick(Duration::from_millis(100), &mut canvas));
        assert!(animator.is_empty());
    }
}
