// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use bitflags::bitflags;
use kurbo::Point;
use scatter_event_state::hover::{HoverEvent, HoverState};
use scatter_event_state::lasso::{LassoAccumulator, LassoSample};
use scatter_event_state::press::PressState;
use scatter_selection::Selection;
use scatter_view::{Camera, CanvasTransform};

use crate::bus::{Event, PubSub, SubscriptionId, Topic};
use crate::config::{ConfigUpdate, ScatterConfig};
use crate::hit::{RaycastParams, raycast};
use crate::points::{PointSet, ScatterPoint};
use crate::render::{Frame, LineDrawer, LineStyle, PointSizes, Renderer, reticle_lines};

bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift; a shift press draws a lasso.
        const SHIFT = 1 << 0;
        /// Control.
        const CONTROL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Windows.
        const META = 1 << 3;
    }
}

/// The point-query and selection engine.
///
/// `Engine` owns the loaded points, the hover and selection state, the lasso,
/// and the notification bus. The embedder forwards canvas-relative pointer
/// events to the `on_*` methods and calls [`Engine::frame`] once per
/// animation frame. Every event is ignored until points are loaded.
///
/// State changes never draw directly; they request a redraw, and the next
/// [`Engine::frame`] performs at most one [`Engine::draw`].
#[derive(Debug)]
pub struct Engine<C, L> {
    config: ScatterConfig,
    canvas: CanvasTransform,
    camera: C,
    points: Option<Arc<PointSet>>,
    selection: Selection<u32>,
    hover: HoverState,
    press: PressState,
    lasso: LassoAccumulator,
    lasso_line: L,
    reticle_h_line: L,
    reticle_v_line: L,
    bus: PubSub,
    shift_drag: bool,
    pointer_in_canvas: bool,
    redraw_requested: bool,
    show_reticle_once: bool,
}

impl<C: Camera, L: LineDrawer> Engine<C, L> {
    /// Creates an engine.
    ///
    /// `make_line` is called three times to create the lasso outline and the
    /// two reticle lines. The camera is placed at the configured initial
    /// position.
    pub fn new<F>(config: ScatterConfig, mut camera: C, mut make_line: F) -> Self
    where
        F: FnMut(LineStyle) -> L,
    {
        let canvas = canvas_for(&config);
        place_camera(&mut camera, &config);
        let lasso_line = make_line(LineStyle::lasso(&config));
        let reticle_h_line = make_line(LineStyle::reticle(&config));
        let reticle_v_line = make_line(LineStyle::reticle(&config));
        let lasso = LassoAccumulator::new(config.lasso_min_dist(), config.lasso_min_delay());
        Self {
            config,
            canvas,
            camera,
            points: None,
            selection: Selection::new(),
            hover: HoverState::new(),
            press: PressState::default(),
            lasso,
            lasso_line,
            reticle_h_line,
            reticle_v_line,
            bus: PubSub::new(),
            shift_drag: false,
            pointer_in_canvas: false,
            redraw_requested: false,
            show_reticle_once: false,
        }
    }

    /// Replaces the loaded points.
    ///
    /// The index is rebuilt before the new set is swapped in. Hover, selection
    /// and any lasso in progress are dropped without notifications, since
    /// their indices refer to the previous set.
    pub fn load<I, P>(&mut self, points: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<ScatterPoint>,
    {
        let set = PointSet::new(points);
        log::info!("loaded {} points", set.len());
        self.points = Some(Arc::new(set));
        self.hover.clear();
        self.selection.clear();
        if self.shift_drag {
            self.shift_drag = false;
            self.camera.set_fixed(false);
        }
        if self.lasso.is_active() {
            self.lasso.cancel();
            self.lasso_line.clear();
            log::debug!("lasso cancelled by load");
        }
        self.request_redraw();
    }

    /// Returns `true` once points have been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.points.is_some()
    }

    /// The loaded point set.
    #[must_use]
    pub fn points(&self) -> Option<&Arc<PointSet>> {
        self.points.as_ref()
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    /// The current coordinate pipeline.
    #[must_use]
    pub fn canvas(&self) -> &CanvasTransform {
        &self.canvas
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// The camera, for pan and zoom input. Request a redraw after moving it.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// The selected points in commit order.
    #[must_use]
    pub fn selection(&self) -> &[u32] {
        self.selection.items()
    }

    /// The hovered point.
    #[must_use]
    pub fn hovered(&self) -> Option<u32> {
        self.hover.current()
    }

    /// Returns `true` while a lasso is being drawn.
    #[must_use]
    pub fn is_lassoing(&self) -> bool {
        self.shift_drag
    }

    /// The lasso outline so far, in normalized device coordinates.
    #[must_use]
    pub fn lasso_path(&self) -> &[Point] {
        self.lasso.ndc_path()
    }

    /// Registers a notification handler.
    pub fn subscribe<F>(&mut self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        self.bus.subscribe(topic, handler)
    }

    /// Removes a notification handler. Returns `true` if it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Applies a configuration update.
    ///
    /// Invalid options are ignored. New lasso settings take effect without
    /// interrupting a lasso in progress.
    pub fn set(&mut self, update: &ConfigUpdate) {
        self.config.apply(update);
        self.canvas = canvas_for(&self.config);
        self.lasso.set_min_dist(self.config.lasso_min_dist());
        self.lasso.set_min_delay(self.config.lasso_min_delay());
        if update.touches_line_style() {
            self.lasso_line.set_style(LineStyle::lasso(&self.config));
            self.reticle_h_line.set_style(LineStyle::reticle(&self.config));
            self.reticle_v_line.set_style(LineStyle::reticle(&self.config));
        }
        self.camera.refresh();
        self.request_redraw();
    }

    /// Asks for a draw on the next [`Engine::frame`].
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns `true` if a redraw is pending.
    #[must_use]
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Replaces the selection with `points` and publishes
    /// [`Event::Select`].
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn select<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = u32>,
    {
        self.selection.replace_with_hashed(points);
        if self.bus.subscriber_count(Topic::Select) > 0 {
            self.publish(Event::Select {
                points: self.selection.items().to_vec(),
            });
        }
        self.request_redraw();
    }

    /// Clears the selection.
    ///
    /// Publishes [`Event::Deselect`] and requests a redraw only if something
    /// was selected.
    pub fn deselect(&mut self) {
        if self.selection.clear() {
            self.publish(Event::Deselect);
            self.request_redraw();
        }
    }

    /// Sets or clears the hovered point.
    ///
    /// Publishes [`Event::PointOver`] when a different point becomes hovered
    /// and [`Event::PointOut`] when the hover is cleared. With
    /// `show_reticle_once`, the next draw shows the reticle even if it is
    /// disabled.
    pub fn hover(&mut self, point: Option<u32>, show_reticle_once: bool) {
        let transition = self.hover.update(point);
        match transition {
            Some(HoverEvent::Over(id)) => self.publish(Event::PointOver(id)),
            Some(HoverEvent::Out(id)) => self.publish(Event::PointOut(id)),
            None => {}
        }
        if show_reticle_once && point.is_some() {
            self.show_reticle_once = true;
            self.request_redraw();
        } else if transition.is_some() {
            self.request_redraw();
        }
    }

    /// Returns the camera to its initial position and publishes
    /// [`Event::View`].
    pub fn reset(&mut self) {
        place_camera(&mut self.camera, &self.config);
        self.publish(Event::View(self.camera.view()));
        self.request_redraw();
    }

    /// Primary button pressed at `pos`.
    ///
    /// With shift held the camera is frozen and a lasso starts at `pos`.
    pub fn on_pointer_down(&mut self, pos: Point, modifiers: Modifiers) {
        if !self.is_loaded() {
            return;
        }
        self.press.press(pos);
        if modifiers.contains(Modifiers::SHIFT) {
            self.shift_drag = true;
            self.camera.set_fixed(true);
            let sample = self.sample(pos);
            self.lasso.start(sample);
            log::debug!("lasso started at {pos:?}");
        }
    }

    /// Primary button released.
    ///
    /// Ends a lasso in progress and commits its selection.
    pub fn on_pointer_up(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.press.release();
        if self.shift_drag {
            self.shift_drag = false;
            self.camera.set_fixed(false);
            self.end_lasso();
        }
    }

    /// Pointer moved to `pos` at time `now` (milliseconds).
    pub fn on_pointer_move(&mut self, pos: Point, now: u64) {
        if !self.is_loaded() {
            return;
        }
        self.press.update(pos);

        if self.pointer_in_canvas && !self.shift_drag {
            let hit = self.raycast(pos);
            log::trace!("hover raycast at {pos:?}: {hit:?}");
            self.hover(hit, false);
        }

        if self.shift_drag {
            let sample = self.sample(pos);
            if self.lasso.extend(now, sample) {
                self.sync_lasso_line();
            }
        }

        // The camera may have panned, or the lasso grown.
        if self.press.is_held() {
            self.request_redraw();
        }
    }

    /// Click at `pos`.
    ///
    /// Selects the point under the pointer, unless the pointer travelled
    /// `click_max_dist` or more since the press.
    pub fn on_click(&mut self, pos: Point) {
        if !self.is_loaded() {
            return;
        }
        let travel = self.press.travel(pos).unwrap_or(0.0);
        if travel >= self.config.click_max_dist() {
            return;
        }
        if let Some(hit) = self.raycast(pos) {
            self.select([hit]);
        }
    }

    /// Double click: clears the selection.
    pub fn on_double_click(&mut self) {
        if self.is_loaded() {
            self.deselect();
        }
    }

    /// Pointer entered the canvas.
    pub fn on_pointer_enter(&mut self) {
        if self.is_loaded() {
            self.pointer_in_canvas = true;
        }
    }

    /// Pointer left the canvas: clears the hover.
    pub fn on_pointer_leave(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.hover(None, false);
        self.pointer_in_canvas = false;
        self.request_redraw();
    }

    /// The window lost focus.
    ///
    /// A lasso in progress is dropped without selecting, the button is
    /// treated as released, and the hover is cleared.
    pub fn on_focus_lost(&mut self) {
        if !self.is_loaded() {
            return;
        }
        if self.shift_drag {
            self.shift_drag = false;
            self.camera.set_fixed(false);
            self.lasso.cancel();
            self.lasso_line.clear();
            log::debug!("lasso cancelled on focus loss");
        }
        self.on_pointer_up();
        self.hover(None, false);
        self.pointer_in_canvas = false;
        self.request_redraw();
    }

    /// A key was released. `Escape` clears the selection.
    pub fn on_key_up(&mut self, key: &str) {
        if self.is_loaded() && key == "Escape" {
            self.deselect();
        }
    }

    /// Per-animation-frame entry point.
    ///
    /// Applies a due trailing lasso sample, then draws if a redraw was
    /// requested since the last frame. Returns `true` if it drew.
    pub fn frame<R: Renderer>(&mut self, now: u64, renderer: &mut R) -> bool {
        if self.lasso.poll(now) {
            self.sync_lasso_line();
            self.request_redraw();
        }
        if !self.redraw_requested {
            return false;
        }
        self.draw(renderer);
        true
    }

    /// Draws immediately.
    ///
    /// Ticks the camera, hands the point frame to `renderer`, draws the
    /// reticle through the hovered point when enabled and the button is up,
    /// draws the lasso outline, and publishes [`Event::View`] if the camera
    /// moved.
    pub fn draw<R: Renderer>(&mut self, renderer: &mut R) {
        self.redraw_requested = false;
        let show_once = std::mem::take(&mut self.show_reticle_once);
        let Some(points) = self.points.clone() else {
            return;
        };

        let view_changed = self.camera.tick();
        let view = self.camera.view();
        renderer.draw_frame(&Frame {
            points: points.points(),
            projection: self.canvas.projection(),
            view,
            model: self.canvas.model(),
            scaling: self.camera.scaling(),
            hovered: self.hover.current(),
            selection: self.selection.items(),
            sizes: PointSizes::from_config(&self.config),
            color_by: self.config.color_by(),
            opacity: self.config.opacity(),
            background: self.config.background(),
        });

        if !self.press.is_held() && (self.config.show_reticle() || show_once) {
            let hovered = self.hover.current().and_then(|id| points.get(id));
            if let Some(p) = hovered {
                let ndc = self.canvas.data_to_ndc(Point::new(p.x, p.y), view);
                let (h, v) = reticle_lines(ndc);
                self.reticle_h_line.set_points(&h);
                self.reticle_v_line.set_points(&v);
                self.reticle_h_line.draw();
                self.reticle_v_line.draw();
            }
        }

        self.lasso_line.draw();

        if view_changed {
            self.publish(Event::View(view));
        }
    }

    /// Releases the line drawers and drops every subscription.
    pub fn destroy(mut self) {
        self.lasso_line.destroy();
        self.reticle_h_line.destroy();
        self.reticle_v_line.destroy();
        self.bus.clear();
    }

    fn publish(&mut self, event: Event) {
        self.bus.publish(&event);
    }

    fn sample(&self, pixel: Point) -> LassoSample {
        let ndc = self.canvas.pixel_to_ndc(pixel);
        LassoSample {
            pixel,
            ndc,
            data: self.canvas.ndc_to_data(ndc, self.camera.view()),
        }
    }

    fn raycast(&self, pixel: Point) -> Option<u32> {
        let points = self.points.as_ref()?;
        let at = self.canvas.pixel_to_data(pixel, self.camera.view());
        let params = RaycastParams {
            point_size: self.config.point_size(),
            scaling: self.camera.scaling(),
            device_pixel_ratio: self.config.device_pixel_ratio(),
            width: self.config.width(),
            height: self.config.height(),
        };
        raycast(points.index(), at, &params)
    }

    fn sync_lasso_line(&mut self) {
        let path = self.lasso.ndc_path();
        if path.len() > 1 {
            self.lasso_line.set_points(path);
        }
    }

    fn end_lasso(&mut self) {
        let polygon = self.lasso.finish().unwrap_or_default();
        let selected = self
            .points
            .as_ref()
            .map(|set| set.select_in_polygon(&polygon))
            .unwrap_or_default();
        log::debug!(
            "lasso with {} vertices selected {} points",
            polygon.len(),
            selected.len()
        );
        self.lasso_line.clear();
        self.select(selected);
    }
}

fn canvas_for(config: &ScatterConfig) -> CanvasTransform {
    CanvasTransform::new(config.width(), config.height())
        .with_data_aspect_ratio(config.aspect_ratio())
}

fn place_camera<C: Camera>(camera: &mut C, config: &ScatterConfig) {
    let initial = config.initial_camera();
    match initial.view {
        Some(view) => camera.set_view(view),
        None => camera.look_at(initial.target, initial.distance, initial.rotation),
    }
}
