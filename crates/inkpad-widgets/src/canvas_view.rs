//! Paints a [`Canvas`] with egui and turns egui pointer input into
//! [`PointerEvent`]s for its session.

use std::collections::HashMap;
use std::time::Duration;

use egui::{
    Color32, ColorImage, CornerRadius, CursorIcon, Painter, Pos2, Rect, Response, Sense, Stroke,
    StrokeKind, TextureHandle, TextureOptions, Ui, Vec2,
};
use inkpad_core::shapes::Image;
use inkpad_core::{Camera, Canvas, Cursor, PointerEvent, SceneSurface, Session, Shape, ShapeId};

use crate::colors::{to_color32, with_opacity};
use crate::theme;

/// Longest frame step fed to the animator; longer gaps are clamped.
const MAX_FRAME_STEP: f32 = 0.1;

fn to_pos2(point: kurbo::Point) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}

/// egui cursor for a surface cursor.
pub fn cursor_icon(cursor: Cursor) -> CursorIcon {
    match cursor {
        Cursor::Default => CursorIcon::Default,
        Cursor::Grab => CursorIcon::Grab,
    }
}

/// Screen placement of the canvas: its top-left corner plus the camera pan.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    origin: Pos2,
    offset: kurbo::Vec2,
}

impl Viewport {
    fn new(rect: Rect, camera: &Camera) -> Self {
        Self {
            origin: rect.min,
            offset: camera.offset,
        }
    }

    fn to_screen(self, point: kurbo::Point) -> Pos2 {
        self.origin + to_pos2(point + self.offset).to_vec2()
    }

    fn to_screen_rect(self, rect: kurbo::Rect) -> Rect {
        Rect::from_two_pos(
            self.to_screen(kurbo::Point::new(rect.x0, rect.y0)),
            self.to_screen(kurbo::Point::new(rect.x1, rect.y1)),
        )
    }
}

/// Widget state for one canvas: texture cache and pointer tracking.
#[derive(Default)]
pub struct CanvasView {
    textures: HashMap<ShapeId, TextureHandle>,
    last_pos: Option<Pos2>,
    /// A press started inside the canvas and has not been released yet.
    pressed_inside: bool,
    last_render_count: u64,
}

impl CanvasView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance animations, route input, and paint the canvas.
    pub fn show(&mut self, ui: &mut Ui, session: &mut Session<Canvas>) -> Option<Response> {
        if session.is_disposed() {
            return None;
        }

        let dt = ui.input(|i| i.stable_dt).min(MAX_FRAME_STEP);
        session.tick(Duration::from_secs_f32(dt));

        let size = session.surface()?.size();
        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(size.width as f32, size.height as f32),
            Sense::click_and_drag(),
        );

        for event in self.pointer_events(ui, &response, rect) {
            session.pointer_event(event);
        }

        let canvas = session.surface_mut()?;
        if response.hovered() || self.pressed_inside {
            ui.ctx().set_cursor_icon(cursor_icon(canvas.cursor()));
        }

        let painter = ui.painter_at(rect);
        self.paint(ui, &painter, rect, canvas);

        let repaint_requested = canvas.take_render_request();
        let rendered = canvas.render_count() != self.last_render_count;
        self.last_render_count = canvas.render_count();
        if repaint_requested || rendered || session.is_animating() {
            ui.ctx().request_repaint();
        }

        Some(response)
    }

    /// Translate this frame's egui pointer state into canvas events,
    /// positions relative to the canvas' top-left corner.
    fn pointer_events(&mut self, ui: &Ui, response: &Response, rect: Rect) -> Vec<PointerEvent> {
        let (latest, pressed, released) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let Some(pos) = latest else {
            self.last_pos = None;
            return Vec::new();
        };
        let local = |p: Pos2| kurbo::Point::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);

        let mut events = Vec::new();
        let tracking = response.hovered() || self.pressed_inside;
        if let Some(prev) = self.last_pos.filter(|&prev| prev != pos && tracking) {
            events.push(PointerEvent::moved(local(prev), local(pos)));
        }
        if pressed && response.hovered() {
            self.pressed_inside = true;
            events.push(PointerEvent::Down { position: local(pos) });
        }
        if released && self.pressed_inside {
            self.pressed_inside = false;
            events.push(PointerEvent::Up { position: local(pos) });
        }

        self.last_pos = Some(pos);
        events
    }

    fn paint(&mut self, ui: &Ui, painter: &Painter, rect: Rect, canvas: &Canvas) {
        painter.rect_filled(rect, CornerRadius::ZERO, to_color32(canvas.background_color()));
        let viewport = Viewport::new(rect, &canvas.camera);

        // Drop textures of images that left the scene
        self.textures.retain(|id, _| canvas.get(*id).is_some());

        for shape in canvas.shapes() {
            self.paint_shape(ui, painter, viewport, shape);
        }

        if let Some(points) = canvas.active_stroke() {
            let brush = canvas.brush();
            painter.line(
                points.iter().map(|&p| viewport.to_screen(p)).collect(),
                Stroke::new(brush.width as f32, to_color32(brush.color)),
            );
        }

        if let Some(shape) = canvas.selected().and_then(|id| canvas.get(id)) {
            painter.rect_stroke(
                viewport.to_screen_rect(shape.bounds()).expand(2.0),
                CornerRadius::same(2),
                Stroke::new(1.0, theme::ACCENT),
                StrokeKind::Outside,
            );
        }
    }

    fn paint_shape(&mut self, ui: &Ui, painter: &Painter, viewport: Viewport, shape: &Shape) {
        let style = shape.style();
        let stroke = Stroke::new(
            style.stroke_width as f32,
            with_opacity(style.stroke_color, style.opacity),
        );
        let fill = style
            .fill_color
            .map(|c| with_opacity(c, style.opacity))
            .unwrap_or(Color32::TRANSPARENT);

        match shape {
            Shape::Rectangle(r) => {
                let rect = viewport.to_screen_rect(r.as_rect());
                painter.rect_filled(rect, CornerRadius::ZERO, fill);
                if style.stroke_width > 0.0 {
                    painter.rect_stroke(rect, CornerRadius::ZERO, stroke, StrokeKind::Middle);
                }
            }
            Shape::Circle(c) => {
                let center = viewport.to_screen(c.center);
                painter.circle(center, c.radius as f32, fill, stroke);
            }
            Shape::Freehand(f) => {
                if f.points.len() >= 2 {
                    painter.line(f.points.iter().map(|&p| viewport.to_screen(p)).collect(), stroke);
                }
            }
            Shape::Group(g) => {
                for child in g.children() {
                    self.paint_shape(ui, painter, viewport, child);
                }
            }
            Shape::Image(img) => {
                let texture = self.texture_for(ui, shape.id(), img);
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(
                    texture.id(),
                    viewport.to_screen_rect(img.as_rect()),
                    uv,
                    Color32::WHITE,
                );
            }
        }
    }

    fn texture_for(&mut self, ui: &Ui, id: ShapeId, image: &Image) -> &TextureHandle {
        self.textures.entry(id).or_insert_with(|| {
            log::trace!("Uploading texture for image {id}");
            let pixels = ColorImage::from_rgba_unmultiplied(
                [image.source_width as usize, image.source_height as usize],
                &image.rgba,
            );
            ui.ctx()
                .load_texture(format!("inkpad-image-{id}"), pixels, TextureOptions::LINEAR)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::{CanvasConfig, Mode, ShapeKind};

    fn run_frame(ctx: &egui::Context, view: &mut CanvasView, session: &mut Session<Canvas>) {
        run_input(ctx, view, session, Vec::new());
    }

    fn run_input(
        ctx: &egui::Context,
        view: &mut CanvasView,
        session: &mut Session<Canvas>,
        events: Vec<egui::Event>,
    ) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                view.show(ui, session);
            });
        });
    }

    fn primary(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_cursor_mapping() {
        assert_eq!(cursor_icon(Cursor::Default), CursorIcon::Default);
        assert_eq!(cursor_icon(Cursor::Grab), CursorIcon::Grab);
    }

    #[test]
    fn test_viewport_applies_pan() {
        let mut camera = Camera::new();
        camera.pan(kurbo::Vec2::new(10.0, -5.0));
        let viewport = Viewport::new(
            Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(500.0, 500.0)),
            &camera,
        );
        assert_eq!(viewport.to_screen(kurbo::Point::new(1.0, 1.0)), Pos2::new(111.0, 46.0));
    }

    #[test]
    fn test_frame_paints_scene_and_advances_animation() {
        let ctx = egui::Context::default();
        let mut view = CanvasView::new();
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        session.set_mode(Mode::Pan).unwrap();
        let id = session.add_shape(ShapeKind::Circle).unwrap();
        let start = session.surface().unwrap().get(id).unwrap().top();

        run_frame(&ctx, &mut view, &mut session);
        run_frame(&ctx, &mut view, &mut session);

        let top = session.surface().unwrap().get(id).unwrap().top();
        assert!(top > start);
    }

    #[test]
    fn test_drag_pans_in_pan_mode() {
        let ctx = egui::Context::default();
        let mut view = CanvasView::new();
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        session.set_mode(Mode::Pan).unwrap();

        let start = Pos2::new(200.0, 200.0);
        let end = Pos2::new(230.0, 190.0);

        // Hover first so the canvas knows it is under the pointer
        for _ in 0..2 {
            run_input(&ctx, &mut view, &mut session, vec![egui::Event::PointerMoved(start)]);
        }
        run_input(&ctx, &mut view, &mut session, vec![primary(start, true)]);
        assert_eq!(session.surface().unwrap().cursor(), Cursor::Grab);
        assert_eq!(session.surface().unwrap().camera.offset, kurbo::Vec2::ZERO);

        run_input(&ctx, &mut view, &mut session, vec![egui::Event::PointerMoved(end)]);
        let canvas = session.surface().unwrap();
        assert_eq!(canvas.camera.offset, kurbo::Vec2::new(30.0, -10.0));
        assert_eq!(canvas.cursor(), Cursor::Grab);

        run_input(&ctx, &mut view, &mut session, vec![primary(end, false)]);
        assert_eq!(session.surface().unwrap().cursor(), Cursor::Default);

        // Moving without a press no longer pans
        run_input(
            &ctx,
            &mut view,
            &mut session,
            vec![egui::Event::PointerMoved(Pos2::new(260.0, 260.0))],
        );
        assert_eq!(
            session.surface().unwrap().camera.offset,
            kurbo::Vec2::new(30.0, -10.0)
        );
    }

    #[test]
    fn test_disposed_session_shows_nothing() {
        let ctx = egui::Context::default();
        let mut view = CanvasView::new();
        let mut session = Session::from_config(&CanvasConfig::default()).unwrap();
        session.dispose();

        let mut shown = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                shown = view.show(ui, &mut session).is_some();
            });
        });
        assert!(!shown);
    }
}
