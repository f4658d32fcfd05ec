//! The session ties a surface to its mode controller, animations and group.

use crate::animation::Animator;
use crate::brush::BrushOptions;
use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::dispatcher::dispatch;
use crate::error::{CanvasError, CanvasResult};
use crate::input::PointerEvent;
use crate::mode::{Mode, ModeController};
use crate::ops::{self, GroupHandle};
use crate::shapes::{Image, SerializableColor, Shape, ShapeId, ShapeKind};
use crate::surface::SceneSurface;
use kurbo::Point;
use std::time::Duration;

/// One interactive canvas.
///
/// Owns the surface until [`Session::dispose`]; afterwards pointer events and
/// ticks are ignored and mutations fail with [`CanvasError::Disposed`].
#[derive(Debug)]
pub struct Session<S: SceneSurface> {
    surface: Option<S>,
    controller: ModeController,
    animator: Animator,
    group: Option<GroupHandle>,
    brush_options: BrushOptions,
}

impl Session<Canvas> {
    /// Build an in-memory canvas from `config` and wrap it.
    pub fn from_config(config: &CanvasConfig) -> CanvasResult<Self> {
        let canvas = Canvas::from_config(config)?;
        Session::new(canvas, config)
    }
}

impl<S: SceneSurface> Session<S> {
    /// Wrap `surface`, applying the configured default brush.
    pub fn new(mut surface: S, config: &CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;
        let brush_options = config.brush_options()?;
        *surface.brush_mut() = config.default_brush()?;

        let mut controller = ModeController::new();
        controller.set_mode(Mode::Idle, &mut surface);

        log::info!(
            "Session started on a {}x{} surface",
            surface.size().width,
            surface.size().height
        );
        Ok(Self {
            surface: Some(surface),
            controller,
            animator: Animator::new(),
            group: None,
            brush_options,
        })
    }

    fn live_surface(&mut self) -> CanvasResult<&mut S> {
        self.surface.as_mut().ok_or_else(|| {
            log::warn!("Operation on a disposed session");
            CanvasError::Disposed
        })
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Switch interaction mode.
    pub fn set_mode(&mut self, mode: Mode) -> CanvasResult<()> {
        let surface = self.surface.as_mut().ok_or(CanvasError::Disposed)?;
        self.controller.set_mode(mode, surface);
        Ok(())
    }

    /// Feed one raw pointer event through the surface and the active mode.
    pub fn pointer_event(&mut self, event: PointerEvent) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        log::trace!("Pointer {event:?}");
        surface.handle_pointer(&event);
        dispatch(&mut self.controller, &event, surface);
    }

    /// Remove everything except the background image.
    pub fn clear(&mut self) -> CanvasResult<Vec<Shape>> {
        let surface = self.surface.as_mut().ok_or(CanvasError::Disposed)?;
        Ok(ops::clear(surface, &mut self.group))
    }

    /// Add an animated shape; returns its ID.
    pub fn add_shape(&mut self, kind: ShapeKind) -> CanvasResult<ShapeId> {
        let surface = self.surface.as_mut().ok_or(CanvasError::Disposed)?;
        let (id, _) = ops::add_shape(kind, surface, &mut self.animator);
        Ok(id)
    }

    /// Group (`true`) or ungroup (`false`) all non-background objects.
    pub fn group(&mut self, enable: bool) -> CanvasResult<()> {
        let surface = self.surface.as_mut().ok_or(CanvasError::Disposed)?;
        ops::group(enable, surface, &mut self.group)
    }

    /// The active group, if any.
    pub fn active_group(&self) -> Option<GroupHandle> {
        self.group
    }

    pub fn brush_options(&self) -> &BrushOptions {
        &self.brush_options
    }

    pub fn set_brush_color(&mut self, color: SerializableColor) -> CanvasResult<()> {
        let surface = self.live_surface()?;
        surface.brush_mut().color = color;
        log::debug!("Brush color {}", color.to_hex());
        Ok(())
    }

    /// Set the brush color from a `#rrggbb` style string.
    pub fn set_brush_color_hex(&mut self, hex: &str) -> CanvasResult<()> {
        let color = SerializableColor::from_hex(hex).ok_or_else(|| {
            log::warn!("Rejected brush color {hex:?}");
            CanvasError::InvalidColor(hex.to_string())
        })?;
        self.set_brush_color(color)
    }

    /// Set the brush width; only the configured widths are accepted.
    pub fn set_brush_width(&mut self, width: u32) -> CanvasResult<()> {
        let width = self.brush_options.check_width(width).inspect_err(|_| {
            log::warn!("Rejected brush width {width}");
        })?;
        let surface = self.live_surface()?;
        surface.brush_mut().width = width;
        log::debug!("Brush width {width}");
        Ok(())
    }

    /// Advance animations by `dt`. Returns true if anything moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.surface.as_mut() {
            Some(surface) => self.animator.tick(dt, surface),
            None => false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Tear down: drop in-flight animations and release the surface.
    pub fn dispose(&mut self) {
        self.animator.invalidate();
        self.group = None;
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
            log::info!("Session disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.surface.is_none()
    }
}

impl Session<Canvas> {
    /// Decode `bytes` and install the result as the background image.
    pub fn load_background(&mut self, bytes: &[u8]) -> CanvasResult<ShapeId> {
        let canvas = self.live_surface()?;
        let image = Image::decode(Point::ZERO, bytes).inspect_err(|e| {
            log::error!("Background image failed to load: {e}");
        })?;
        let (width, height) = (image.width, image.height);
        let id = canvas.set_background_image(image);
        canvas.render_all();
        log::info!("Background image installed ({width}x{height})");
        Ok(id)
    }
}

impl<S: SceneSurface> Drop for Session<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushConfig;
    use crate::input::Cursor;
    use crate::shapes::image::tests::png_bytes;
    use kurbo::Vec2;

    fn session_with_background() -> (Session<Canvas>, ShapeId) {
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        let bg = session.load_background(&png_bytes(16, 16)).unwrap();
        (session, bg)
    }

    fn ids(session: &Session<Canvas>) -> Vec<ShapeId> {
        session.surface().unwrap().object_ids()
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::from_config(&CanvasConfig::default()).unwrap();
        assert_eq!(session.mode(), Mode::Idle);
        assert!(session.active_group().is_none());
        let canvas = session.surface().unwrap();
        assert_eq!(*canvas.brush(), BrushConfig::default());
        assert!(!canvas.is_drawing_mode());
    }

    #[test]
    fn test_scenario_group_roundtrip() {
        let (mut session, bg) = session_with_background();
        assert_eq!(ids(&session), vec![bg]);

        let rect = session.add_shape(ShapeKind::Rectangle).unwrap();
        assert_eq!(ids(&session).len(), 2);

        session.group(true).unwrap();
        let objects = ids(&session);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0], bg);
        let group = session.active_group().unwrap();
        let aggregate = session
            .surface()
            .unwrap()
            .get(group.id())
            .and_then(Shape::as_group)
            .unwrap();
        assert_eq!(aggregate.member_ids(), vec![rect]);

        session.group(false).unwrap();
        assert_eq!(ids(&session), vec![bg, rect]);
    }

    #[test]
    fn test_background_replaced_on_reload() {
        let (mut session, bg) = session_with_background();
        let rect = session.add_shape(ShapeKind::Rectangle).unwrap();
        let bg2 = session.load_background(&png_bytes(8, 8)).unwrap();
        assert_ne!(bg, bg2);
        assert_eq!(ids(&session), vec![bg2, rect]);
    }

    #[test]
    fn test_bad_background_is_rejected() {
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        let err = session.load_background(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CanvasError::ImageLoad(_)));
        assert!(session.surface().unwrap().background_image().is_none());
    }

    #[test]
    fn test_free_draw_through_session() {
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        session.set_mode(Mode::FreeDraw).unwrap();
        session.set_brush_width(15).unwrap();

        let points = [Point::new(10.0, 10.0), Point::new(40.0, 20.0), Point::new(80.0, 90.0)];
        session.pointer_event(PointerEvent::Down { position: points[0] });
        for pair in points.windows(2) {
            session.pointer_event(PointerEvent::moved(pair[0], pair[1]));
        }
        session.pointer_event(PointerEvent::Up { position: points[2] });

        let canvas = session.surface().unwrap();
        assert_eq!(canvas.len(), 1);
        let Some(Shape::Freehand(stroke)) = canvas.shapes().next() else {
            panic!("expected a stroke");
        };
        assert!((stroke.style.stroke_width - 15.0).abs() < f64::EPSILON);

        // Leaving free-draw switches the brush off
        session.set_mode(Mode::Pan).unwrap();
        assert!(!session.surface().unwrap().is_drawing_mode());
    }

    #[test]
    fn test_pan_through_session() {
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        session.set_mode(Mode::Pan).unwrap();

        session.pointer_event(PointerEvent::Down { position: Point::new(0.0, 0.0) });
        session.pointer_event(PointerEvent::moved(Point::new(0.0, 0.0), Point::new(5.0, 5.0)));
        assert_eq!(session.surface().unwrap().cursor(), Cursor::Grab);
        session.pointer_event(PointerEvent::moved(Point::new(5.0, 5.0), Point::new(20.0, -5.0)));
        session.pointer_event(PointerEvent::Up { position: Point::new(20.0, -5.0) });

        let canvas = session.surface().unwrap();
        assert_eq!(canvas.camera.offset, Vec2::new(20.0, -5.0));
        assert_eq!(canvas.cursor(), Cursor::Default);
    }

    #[test]
    fn test_brush_validation() {
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        assert!(matches!(
            session.set_brush_width(4),
            Err(CanvasError::UnsupportedBrushWidth(4))
        ));
        assert_eq!(session.surface().unwrap().brush().width, 10);

        assert!(matches!(
            session.set_brush_color_hex("blue"),
            Err(CanvasError::InvalidColor(_))
        ));
        session.set_brush_color_hex("#0081a7").unwrap();
        assert_eq!(
            session.surface().unwrap().brush().color,
            SerializableColor::rgb(0x00, 0x81, 0xa7)
        );
    }

    #[test]
    fn test_animation_runs_on_ticks() {
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        let id = session.add_shape(ShapeKind::Rectangle).unwrap();
        assert!(session.is_animating());

        while session.tick(Duration::from_millis(16)) {}
        assert!(!session.is_animating());
        let top = session.surface().unwrap().get(id).unwrap().top();
        assert!((top - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_dispose_stops_everything() {
        let (mut session, _) = session_with_background();
        session.add_shape(ShapeKind::Circle).unwrap();
        session.dispose();

        assert!(session.is_disposed());
        assert!(!session.is_animating());
        assert!(!session.tick(Duration::from_millis(16)));
        session.pointer_event(PointerEvent::Down { position: Point::ZERO });

        assert!(matches!(session.clear(), Err(CanvasError::Disposed)));
        assert!(matches!(
            session.add_shape(ShapeKind::Rectangle),
            Err(CanvasError::Disposed)
        ));
        assert!(matches!(session.group(true), Err(CanvasError::Disposed)));
        assert!(matches!(session.set_mode(Mode::Pan), Err(CanvasError::Disposed)));
        assert!(matches!(session.set_brush_width(5), Err(CanvasError::Disposed)));
        assert!(matches!(
            session.load_background(&png_bytes(2, 2)),
            Err(CanvasError::Disposed)
        ));

        // Second dispose is harmless
        session.dispose();
    }
}
