// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lasso accumulator: build a freehand polygon from pointer samples.
//!
//! ## Usage
//!
//! 1) On a lasso-starting press, call [`LassoAccumulator::start`] with the
//!    first [`LassoSample`].
//! 2) On each pointer move, call [`LassoAccumulator::extend`]. Samples pass a
//!    time throttle (at most one per `min_delay` milliseconds, with a trailing
//!    sample kept) and then a distance gate (strictly farther than `min_dist`
//!    pixels from the last accepted sample).
//! 3) Once per frame, call [`LassoAccumulator::poll`] so a held-back trailing
//!    sample is applied after the pointer pauses.
//! 4) On release, call [`LassoAccumulator::finish`] to take the data-space
//!    polygon, or [`LassoAccumulator::cancel`] to drop it.
//!
//! Two paths are kept in lock step: one in normalized device coordinates for
//! drawing the outline and one in data space for the containment test.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use scatter_event_state::lasso::{LassoAccumulator, LassoSample};
//!
//! // Sample at pixel (x, y); NDC and data positions are computed by the caller.
//! let sample = |x: f64, y: f64| LassoSample {
//!     pixel: Point::new(x, y),
//!     ndc: Point::new(x / 50.0 - 1.0, 1.0 - y / 50.0),
//!     data: Point::new(x / 50.0 - 1.0, 1.0 - y / 50.0),
//! };
//!
//! let mut lasso = LassoAccumulator::new(2.0, 8);
//! lasso.start(sample(10.0, 10.0));
//! assert!(lasso.extend(100, sample(30.0, 10.0)));
//! assert!(lasso.extend(200, sample(30.0, 30.0)));
//! assert_eq!(lasso.ndc_path().len(), 3);
//!
//! let polygon = lasso.finish().unwrap();
//! assert_eq!(polygon.len(), 3);
//! assert!(!lasso.is_active());
//! ```

use alloc::vec::Vec;

use kurbo::Point;

use crate::throttle::Throttle;

/// One pointer position expressed in all three coordinate spaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LassoSample {
    /// Canvas position in pixels, used for the distance gate.
    pub pixel: Point,
    /// Normalized device coordinates, used for the on-screen outline.
    pub ndc: Point,
    /// Data-space position, used for the containment test.
    pub data: Point,
}

/// Whether a lasso is being drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LassoPhase {
    /// No lasso in progress.
    #[default]
    Idle,
    /// A lasso is growing from pointer samples.
    Extending,
}

/// Throttled accumulator for a freehand selection polygon.
#[derive(Clone, Debug)]
pub struct LassoAccumulator {
    phase: LassoPhase,
    ndc: Vec<Point>,
    data: Vec<Point>,
    last_pixel: Option<Point>,
    min_dist: f64,
    throttle: Throttle<LassoSample>,
}

impl LassoAccumulator {
    /// Creates an idle accumulator.
    ///
    /// `min_dist` is in pixels and `min_delay` in milliseconds.
    #[must_use]
    pub fn new(min_dist: f64, min_delay: u64) -> Self {
        Self {
            phase: LassoPhase::Idle,
            ndc: Vec::new(),
            data: Vec::new(),
            last_pixel: None,
            min_dist,
            throttle: Throttle::new(min_delay),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LassoPhase {
        self.phase
    }

    /// Returns `true` while a lasso is being drawn.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == LassoPhase::Extending
    }

    /// The outline in normalized device coordinates.
    #[must_use]
    pub fn ndc_path(&self) -> &[Point] {
        &self.ndc
    }

    /// The polygon in data space.
    #[must_use]
    pub fn data_path(&self) -> &[Point] {
        &self.data
    }

    /// Minimum pixel distance between accepted samples.
    #[must_use]
    pub fn min_dist(&self) -> f64 {
        self.min_dist
    }

    /// Minimum delay in milliseconds between processed samples.
    #[must_use]
    pub fn min_delay(&self) -> u64 {
        self.throttle.delay()
    }

    /// Sets the distance gate. Non-positive or non-finite values are ignored.
    pub fn set_min_dist(&mut self, min_dist: f64) {
        if min_dist.is_finite() && min_dist > 0.0 {
            self.min_dist = min_dist;
        }
    }

    /// Sets the throttle delay. Zero is ignored.
    ///
    /// An in-progress lasso keeps its path and any pending trailing sample.
    pub fn set_min_delay(&mut self, min_delay: u64) {
        if min_delay > 0 {
            self.throttle.set_delay(min_delay);
        }
    }

    /// Begins a lasso at `sample`, discarding any previous path.
    pub fn start(&mut self, sample: LassoSample) {
        self.clear();
        self.phase = LassoPhase::Extending;
        self.ndc.push(sample.ndc);
        self.data.push(sample.data);
        self.last_pixel = Some(sample.pixel);
    }

    /// Offers a pointer sample taken at time `now`.
    ///
    /// Returns `true` if a vertex was appended. Ignored while idle.
    pub fn extend(&mut self, now: u64, sample: LassoSample) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.throttle.call(now, sample) {
            Some(sample) => self.accept(sample),
            None => false,
        }
    }

    /// Applies a held-back trailing sample once its deadline has passed.
    ///
    /// Returns `true` if a vertex was appended.
    pub fn poll(&mut self, now: u64) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.throttle.poll(now) {
            Some(sample) => self.accept(sample),
            None => false,
        }
    }

    /// Ends the lasso and returns its data-space polygon.
    ///
    /// A pending trailing sample is applied first. Returns `None` if no lasso
    /// was in progress. The accumulator is idle afterwards.
    pub fn finish(&mut self) -> Option<Vec<Point>> {
        if !self.is_active() {
            return None;
        }
        if let Some(sample) = self.throttle.flush() {
            self.accept(sample);
        }
        let polygon = core::mem::take(&mut self.data);
        self.clear();
        Some(polygon)
    }

    /// Drops the lasso without producing a polygon.
    pub fn cancel(&mut self) {
        self.clear();
    }

    fn accept(&mut self, sample: LassoSample) -> bool {
        let far_enough = self
            .last_pixel
            .is_none_or(|last| (sample.pixel - last).hypot() > self.min_dist);
        if !far_enough {
            return false;
        }
        self.ndc.push(sample.ndc);
        self.data.push(sample.data);
        self.last_pixel = Some(sample.pixel);
        log::trace!("lasso vertex {} at {:?}", self.data.len(), sample.pixel);
        true
    }

    fn clear(&mut self) {
        self.phase = LassoPhase::Idle;
        self.ndc.clear();
        self.data.clear();
        self.last_pixel = None;
        self.throttle.reset();
    }
}
