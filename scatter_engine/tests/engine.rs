// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine scenarios driven through the public event methods.
//!
//! Every test uses a 100x100 canvas with an unzoomed camera, so pixel
//! `(px, py)` maps to data `(px / 50 - 1, 1 - py / 50)`.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Affine, Point, Vec2};
use scatter_engine::{
    Camera, ConfigUpdate, Engine, Event, Frame, LineDrawer, LineStyle, Modifiers, Renderer,
    ScatterConfig, Topic,
};
use scatter_view::Camera2D;

#[derive(Debug, Default)]
struct LineLog {
    points: Vec<Point>,
    style: Option<LineStyle>,
    draws: usize,
    clears: usize,
    destroyed: bool,
}

#[derive(Debug)]
struct RecordingLine(Rc<RefCell<LineLog>>);

impl LineDrawer for RecordingLine {
    fn set_points(&mut self, points: &[Point]) {
        self.0.borrow_mut().points = points.to_vec();
    }
    fn set_style(&mut self, style: LineStyle) {
        self.0.borrow_mut().style = Some(style);
    }
    fn draw(&mut self) {
        self.0.borrow_mut().draws += 1;
    }
    fn clear(&mut self) {
        let mut log = self.0.borrow_mut();
        log.points.clear();
        log.clears += 1;
    }
    fn destroy(&mut self) {
        self.0.borrow_mut().destroyed = true;
    }
}

#[derive(Debug, Default)]
struct CountingRenderer {
    frames: usize,
    last_hovered: Option<u32>,
    last_selection: Vec<u32>,
}

impl Renderer for CountingRenderer {
    fn draw_frame(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        self.last_hovered = frame.hovered;
        self.last_selection = frame.selection.to_vec();
    }
}

struct Harness {
    engine: Engine<Camera2D, RecordingLine>,
    /// Lasso, horizontal reticle, vertical reticle.
    lines: Vec<Rc<RefCell<LineLog>>>,
    events: Rc<RefCell<Vec<Event>>>,
    renderer: CountingRenderer,
}

const ALL_TOPICS: [Topic; 5] = [
    Topic::Select,
    Topic::Deselect,
    Topic::PointOver,
    Topic::PointOut,
    Topic::View,
];

impl Harness {
    fn new(config: ScatterConfig) -> Self {
        let mut lines = Vec::new();
        let mut engine = Engine::new(config, Camera2D::new(), |style| {
            let log = Rc::new(RefCell::new(LineLog {
                style: Some(style),
                ..LineLog::default()
            }));
            lines.push(Rc::clone(&log));
            RecordingLine(log)
        });
        let events = Rc::new(RefCell::new(Vec::new()));
        for topic in ALL_TOPICS {
            let sink = Rc::clone(&events);
            engine.subscribe(topic, move |e| sink.borrow_mut().push(e.clone()));
        }
        Self {
            engine,
            lines,
            events,
            renderer: CountingRenderer::default(),
        }
    }

    fn loaded() -> Self {
        let mut h = Self::new(ScatterConfig::default());
        h.engine.load([(0.0, 0.0), (0.5, 0.5), (0.9, -0.9)]);
        h.engine.on_pointer_enter();
        h.flush();
        h
    }

    /// Runs a frame and drains recorded events.
    fn flush(&mut self) -> bool {
        let drew = self.engine.frame(0, &mut self.renderer);
        self.events.borrow_mut().clear();
        drew
    }

    fn take_events(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn tap(&mut self, pos: Point) {
        self.engine.on_pointer_down(pos, Modifiers::empty());
        self.engine.on_pointer_up();
        self.engine.on_click(pos);
    }

    fn lasso(&self) -> std::cell::Ref<'_, LineLog> {
        self.lines[0].borrow()
    }
}

#[test]
fn hover_click_escape_scenario() {
    let mut h = Harness::loaded();

    h.engine.on_pointer_move(Point::new(50.0, 50.0), 0);
    assert_eq!(h.engine.hovered(), Some(0));
    assert_eq!(h.take_events(), [Event::PointOver(0)]);

    h.tap(Point::new(50.0, 50.0));
    assert_eq!(h.engine.selection(), &[0]);
    assert_eq!(h.take_events(), [Event::Select { points: vec![0] }]);

    h.engine.on_key_up("Escape");
    assert!(h.engine.selection().is_empty());
    assert_eq!(h.take_events(), [Event::Deselect]);

    // Other keys do nothing.
    h.engine.on_key_up("a");
    assert!(h.take_events().is_empty());
}

#[test]
fn hover_click_escape_on_diagonal_points() {
    let mut h = Harness::new(ScatterConfig::default());
    h.engine.load([(0.0, 0.0), (0.9, 0.9), (-0.9, -0.9)]);
    h.engine.on_pointer_enter();
    h.flush();

    h.engine.on_pointer_move(Point::new(50.0, 50.0), 0);
    assert_eq!(h.take_events(), [Event::PointOver(0)]);

    h.tap(Point::new(50.0, 50.0));
    assert_eq!(h.engine.selection(), &[0]);
    assert_eq!(h.take_events(), [Event::Select { points: vec![0] }]);

    h.engine.on_key_up("Escape");
    assert!(h.engine.selection().is_empty());
    assert_eq!(h.take_events(), [Event::Deselect]);
}

#[test]
fn hovering_the_same_point_publishes_once() {
    let mut h = Harness::loaded();
    h.engine.on_pointer_move(Point::new(50.0, 50.0), 0);
    h.engine.on_pointer_move(Point::new(50.5, 50.0), 5);
    assert_eq!(h.take_events(), [Event::PointOver(0)]);

    // Directly onto another point: only the new point-over.
    h.engine.on_pointer_move(Point::new(75.0, 25.0), 10);
    assert_eq!(h.take_events(), [Event::PointOver(1)]);

    // Into empty space.
    h.engine.on_pointer_move(Point::new(10.0, 90.0), 15);
    assert_eq!(h.take_events(), [Event::PointOut(1)]);
    assert_eq!(h.engine.hovered(), None);
}

#[test]
fn no_hover_outside_canvas() {
    let mut h = Harness::loaded();
    h.engine.on_pointer_move(Point::new(50.0, 50.0), 0);
    assert_eq!(h.take_events(), [Event::PointOver(0)]);

    h.engine.on_pointer_leave();
    assert_eq!(h.engine.hovered(), None);
    assert_eq!(h.take_events(), [Event::PointOut(0)]);
    h.flush();

    h.engine.on_pointer_move(Point::new(50.0, 50.0), 10);
    assert_eq!(h.engine.hovered(), None);
    assert!(h.take_events().is_empty());
}

#[test]
fn click_select_replaces() {
    let mut h = Harness::loaded();

    h.tap(Point::new(50.0, 50.0));
    assert_eq!(h.engine.selection(), &[0]);

    h.tap(Point::new(75.0, 25.0));
    assert_eq!(h.engine.selection(), &[1]);
    assert_eq!(h.engine.selection().len(), 1);
}

#[test]
fn click_after_drag_is_ignored() {
    let mut h = Harness::loaded();
    h.engine.on_pointer_down(Point::new(40.0, 50.0), Modifiers::empty());
    h.engine.on_pointer_up();
    h.engine.on_click(Point::new(50.0, 50.0));
    assert!(h.engine.selection().is_empty());
    assert!(h.take_events().is_empty());
}

#[test]
fn click_on_empty_space_keeps_selection() {
    let mut h = Harness::loaded();
    h.tap(Point::new(50.0, 50.0));
    h.take_events();

    h.tap(Point::new(10.0, 10.0));
    assert_eq!(h.engine.selection(), &[0]);
    assert!(h.take_events().is_empty());
}

#[test]
fn deselect_is_idempotent() {
    let mut h = Harness::loaded();
    assert!(!h.engine.redraw_requested());

    h.engine.deselect();
    h.engine.on_double_click();
    assert!(h.take_events().is_empty());
    assert!(!h.engine.redraw_requested());
    assert!(!h.flush());
}

#[test]
fn select_publishes_even_when_unchanged() {
    let mut h = Harness::loaded();
    h.engine.select([2, 0, 2]);
    h.engine.select([2, 0]);
    assert_eq!(h.engine.selection(), &[2, 0]);
    assert_eq!(
        h.take_events(),
        [
            Event::Select { points: vec![2, 0] },
            Event::Select { points: vec![2, 0] },
        ]
    );
}

#[test]
fn events_before_load_are_ignored() {
    let mut h = Harness::new(ScatterConfig::default());
    h.engine.on_pointer_enter();
    h.engine.on_pointer_move(Point::new(50.0, 50.0), 0);
    h.engine.on_pointer_down(Point::new(50.0, 50.0), Modifiers::SHIFT);
    h.engine.on_click(Point::new(50.0, 50.0));
    h.engine.on_key_up("Escape");
    h.engine.on_focus_lost();

    assert!(!h.engine.is_lassoing());
    assert!(h.take_events().is_empty());
    assert!(!h.flush());
    assert_eq!(h.renderer.frames, 0);
}

#[test]
fn lasso_selects_points_inside() {
    let mut h = Harness::loaded();

    h.engine.on_pointer_down(Point::new(25.0, 25.0), Modifiers::SHIFT);
    assert!(h.engine.is_lassoing());
    assert!(h.engine.camera().is_fixed());

    h.engine.on_pointer_move(Point::new(75.0, 25.0), 100);
    h.engine.on_pointer_move(Point::new(75.0, 75.0), 200);
    h.engine.on_pointer_move(Point::new(25.0, 75.0), 300);
    assert_eq!(h.engine.lasso_path().len(), 4);
    assert_eq!(h.lasso().points.len(), 4);
    // No hover while lassoing.
    assert!(h.take_events().is_empty());

    h.engine.on_pointer_up();
    assert!(!h.engine.is_lassoing());
    assert!(!h.engine.camera().is_fixed());
    assert_eq!(h.engine.selection(), &[0]);
    assert_eq!(h.take_events(), [Event::Select { points: vec![0] }]);
    assert!(h.engine.lasso_path().is_empty());
    assert!(h.lasso().points.is_empty());
    assert_eq!(h.lasso().clears, 1);
}

#[test]
fn short_lasso_commits_empty_selection() {
    let mut h = Harness::loaded();
    h.engine.select([1]);
    h.take_events();

    h.engine.on_pointer_down(Point::new(25.0, 25.0), Modifiers::SHIFT);
    h.engine.on_pointer_up();
    assert!(h.engine.selection().is_empty());
    assert_eq!(h.take_events(), [Event::Select { points: vec![] }]);
}

#[test]
fn lasso_trailing_sample_applied_by_frame() {
    let mut h = Harness::new(ScatterConfig::default());
    h.engine.set(&ConfigUpdate::new().lasso_min_delay(50));
    h.engine.load([(0.0, 0.0)]);

    h.engine.on_pointer_down(Point::new(25.0, 25.0), Modifiers::SHIFT);
    h.engine.on_pointer_move(Point::new(75.0, 25.0), 1_000);
    h.engine.on_pointer_move(Point::new(75.0, 75.0), 1_010);
    assert_eq!(h.engine.lasso_path().len(), 2);

    // Too early.
    h.engine.frame(1_040, &mut h.renderer);
    assert_eq!(h.engine.lasso_path().len(), 2);

    h.engine.frame(1_050, &mut h.renderer);
    assert_eq!(h.engine.lasso_path().len(), 3);
    assert_eq!(h.lasso().points.len(), 3);
}

#[test]
fn lasso_release_flushes_pending_sample() {
    let mut h = Harness::loaded();
    h.engine.set(&ConfigUpdate::new().lasso_min_delay(50));

    h.engine.on_pointer_down(Point::new(25.0, 25.0), Modifiers::SHIFT);
    h.engine.on_pointer_move(Point::new(90.0, 50.0), 0);
    h.engine.on_pointer_move(Point::new(60.0, 75.0), 10);
    h.engine.on_pointer_move(Point::new(25.0, 75.0), 20);
    assert_eq!(h.engine.lasso_path().len(), 2);

    // Without the flushed last sample the path is a segment and selects nothing.
    h.engine.on_pointer_up();
    assert_eq!(h.engine.selection(), &[0]);
}

#[test]
fn focus_loss_cancels_lasso_and_clears_hover() {
    let mut h = Harness::loaded();
    h.engine.on_pointer_move(Point::new(50.0, 50.0), 0);
    h.take_events();

    h.engine.on_pointer_down(Point::new(25.0, 25.0), Modifiers::SHIFT);
    h.engine.on_pointer_move(Point::new(75.0, 25.0), 100);
    h.engine.on_pointer_move(Point::new(75.0, 75.0), 200);

    h.engine.on_focus_lost();
    assert!(!h.engine.is_lassoing());
    assert!(!h.engine.camera().is_fixed());
    assert!(h.engine.lasso_path().is_empty());
    assert!(h.engine.selection().is_empty());
    assert_eq!(h.engine.hovered(), None);
    assert_eq!(h.take_events(), [Event::PointOut(0)]);
    assert!(h.engine.redraw_requested());
}

#[test]
fn moves_while_pressed_request_redraws() {
    let mut h = Harness::loaded();
    h.engine.on_pointer_move(Point::new(10.0, 90.0), 0);
    assert!(!h.engine.redraw_requested());

    h.engine.on_pointer_down(Point::new(10.0, 90.0), Modifiers::empty());
    h.engine.on_pointer_move(Point::new(12.0, 90.0), 5);
    assert!(h.engine.redraw_requested());
}

#[test]
fn frames_coalesce_redraw_requests() {
    let mut h = Harness::loaded();
    let before = h.renderer.frames;

    h.engine.select([0]);
    h.engine.select([1]);
    h.engine.request_redraw();
    assert!(h.flush());
    assert!(!h.flush());
    assert_eq!(h.renderer.frames, before + 1);
    assert_eq!(h.renderer.last_selection, [1]);
}

#[test]
fn reticle_follows_hovered_point() {
    let mut h = Harness::loaded();
    h.engine.set(&ConfigUpdate::new().show_reticle(true));
    h.engine.on_pointer_move(Point::new(75.0, 25.0), 0);
    h.flush();

    assert_eq!(h.renderer.last_hovered, Some(1));
    assert_eq!(
        h.lines[1].borrow().points,
        [Point::new(-1.0, 0.5), Point::new(1.0, 0.5)]
    );
    assert_eq!(
        h.lines[2].borrow().points,
        [Point::new(0.5, 1.0), Point::new(0.5, -1.0)]
    );
    assert_eq!(h.lines[1].borrow().draws, 1);
}

#[test]
fn reticle_hidden_while_pressed() {
    let mut h = Harness::loaded();
    h.engine.set(&ConfigUpdate::new().show_reticle(true));
    h.engine.on_pointer_move(Point::new(75.0, 25.0), 0);
    h.engine.on_pointer_down(Point::new(75.0, 25.0), Modifiers::empty());
    h.flush();
    assert_eq!(h.lines[1].borrow().draws, 0);
}

#[test]
fn reticle_once_shows_a_single_frame() {
    let mut h = Harness::loaded();
    h.engine.hover(Some(2), true);
    assert_eq!(h.take_events(), [Event::PointOver(2)]);
    h.flush();
    assert_eq!(h.lines[1].borrow().draws, 1);

    h.engine.request_redraw();
    h.flush();
    assert_eq!(h.lines[1].borrow().draws, 1);
}

#[test]
fn lasso_draws_every_frame() {
    let mut h = Harness::loaded();
    let before = h.lasso().draws;
    h.engine.request_redraw();
    h.flush();
    assert_eq!(h.lasso().draws, before + 1);
}

#[test]
fn camera_changes_publish_view_on_draw() {
    let mut h = Harness::loaded();
    h.engine.camera_mut().pan_by(Vec2::new(0.25, 0.0));
    h.engine.request_redraw();
    h.engine.frame(0, &mut h.renderer);

    let expected = Affine::translate((0.25, 0.0));
    assert_eq!(h.take_events(), [Event::View(expected)]);

    // Panned right by a quarter of NDC: pixel (62.5, 50) is now the origin.
    h.engine.on_pointer_move(Point::new(62.5, 50.0), 0);
    assert_eq!(h.engine.hovered(), Some(0));
}

#[test]
fn reset_restores_initial_view() {
    let mut h = Harness::loaded();
    h.engine.camera_mut().zoom_about(Point::ZERO, 2.0);
    h.flush();

    h.engine.reset();
    assert_eq!(h.engine.camera().view(), Affine::IDENTITY);
    assert_eq!(h.take_events(), [Event::View(Affine::IDENTITY)]);
    assert!(h.engine.redraw_requested());
}

#[test]
fn invalid_config_is_ignored() {
    let mut h = Harness::loaded();
    h.engine.set(
        &ConfigUpdate::new()
            .point_size(-3.0)
            .width(0.0)
            .lasso_min_dist(0.0)
            .aspect_ratio(2.0),
    );
    let config = h.engine.config();
    assert_eq!(config.point_size(), 6.0);
    assert_eq!(config.width(), 100.0);
    assert_eq!(config.lasso_min_dist(), 2.0);
    assert_eq!(h.engine.canvas().data_aspect_ratio(), 2.0);
}

#[test]
fn line_colours_follow_config() {
    let mut h = Harness::loaded();
    let red = peniko::Color::new([1.0, 0.0, 0.0, 1.0]);
    h.engine.set(&ConfigUpdate::new().lasso_color(red));
    assert_eq!(h.lasso().style.map(|s| s.color), Some(red));
    assert_eq!(
        h.lines[1].borrow().style.map(|s| s.color),
        Some(scatter_engine::DEFAULT_RETICLE_COLOR)
    );
}

#[test]
fn reload_drops_hover_and_selection() {
    let mut h = Harness::loaded();
    h.engine.on_pointer_move(Point::new(50.0, 50.0), 0);
    h.engine.select([0, 1]);
    h.take_events();

    h.engine.load([(0.1, 0.1)]);
    assert_eq!(h.engine.hovered(), None);
    assert!(h.engine.selection().is_empty());
    assert_eq!(h.engine.points().map(|p| p.len()), Some(1));
    assert!(h.take_events().is_empty());
}

#[test]
fn unsubscribed_handlers_stop_receiving() {
    let mut h = Harness::loaded();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = h
        .engine
        .subscribe(Topic::Select, move |_| *sink.borrow_mut() += 1);

    h.engine.select([0]);
    assert!(h.engine.unsubscribe(id));
    h.engine.select([1]);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn destroy_releases_lines() {
    let h = Harness::loaded();
    let lines = h.lines.clone();
    h.engine.destroy();
    assert!(lines.iter().all(|l| l.borrow().destroyed));
}

#[test]
fn load_during_lasso_ends_the_drag() {
    let mut h = Harness::loaded();
    h.engine.on_pointer_down(Point::new(25.0, 25.0), Modifiers::SHIFT);
    h.engine.on_pointer_move(Point::new(75.0, 25.0), 100);
    assert!(h.engine.is_lassoing());
    assert!(h.engine.camera().is_fixed());

    h.engine.load([(0.0, 0.0)]);
    assert!(!h.engine.is_lassoing());
    assert!(!h.engine.camera().is_fixed());
    assert!(h.engine.lasso_path().is_empty());

    // The rest of the drag neither extends a lasso nor commits one.
    h.engine.on_pointer_move(Point::new(75.0, 75.0), 200);
    h.engine.on_pointer_up();
    assert!(h.engine.lasso_path().is_empty());
    assert!(h.engine.selection().is_empty());
    assert!(h.take_events().is_empty());
}

#[test]
fn select_without_listeners_still_updates() {
    let mut engine = Engine::new(ScatterConfig::default(), Camera2D::new(), |_| {
        RecordingLine(Rc::default())
    });
    engine.load([(0.0, 0.0), (0.5, 0.5)]);
    engine.select([1, 1, 0]);
    assert_eq!(engine.selection(), &[1, 0]);
    assert!(engine.redraw_requested());
}
