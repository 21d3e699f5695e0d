// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

/// A 2D camera as seen by the picking engine.
///
/// The engine only reads the current view and zoom, freezes the camera while
/// a lasso is drawn, and ticks it once per frame. How the camera reacts to
/// wheel and drag input is up to the implementation.
pub trait Camera {
    /// The current view matrix, mapping data space (after the model matrix)
    /// into view space (before the projection).
    fn view(&self) -> Affine;

    /// The current zoom factor; `1.0` means unzoomed.
    fn scaling(&self) -> f64;

    /// Points the camera at `target` from `distance`, rotated by `rotation`
    /// radians. Larger distances zoom out.
    fn look_at(&mut self, target: Point, distance: f64, rotation: f64);

    /// Replaces the view matrix.
    fn set_view(&mut self, view: Affine);

    /// Freezes (`true`) or releases (`false`) the camera.
    ///
    /// A fixed camera ignores user pan and zoom input.
    fn set_fixed(&mut self, fixed: bool);

    /// Returns `true` while the camera is frozen.
    fn is_fixed(&self) -> bool;

    /// Advances the camera by one frame and reports whether the view changed
    /// since the previous tick.
    fn tick(&mut self) -> bool;

    /// Re-reads any externally owned state such as the canvas size.
    fn refresh(&mut self) {}
}

/// Reference [`Camera`] with uniform pan and zoom.
///
/// `Camera2D` tracks a view matrix and a change flag that [`Camera::tick`]
/// consumes. Pan and zoom are expressed in view space, the space after the
/// view matrix and before the projection. Zoom is clamped to a configurable
/// range of [`Camera::scaling`] values.
#[derive(Clone, Debug)]
pub struct Camera2D {
    view: Affine,
    fixed: bool,
    changed: bool,
    min_scaling: f64,
    max_scaling: f64,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera2D {
    /// Creates an unzoomed camera looking at the data origin.
    ///
    /// Zoom is clamped to `[1e-3, 1e3]` by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: Affine::IDENTITY,
            fixed: false,
            changed: false,
            min_scaling: 1e-3,
            max_scaling: 1e3,
        }
    }

    /// Creates a camera with an explicit initial view.
    #[must_use]
    pub fn with_view(view: Affine) -> Self {
        let mut camera = Self::new();
        camera.view = view;
        camera
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The range is normalized so that `min <= max`. The current view is not
    /// re-clamped; the limits apply to subsequent zoom operations.
    pub fn set_zoom_limits(&mut self, min: f64, max: f64) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_scaling = min;
        self.max_scaling = max;
    }

    /// Pans the view by `delta` in view space.
    ///
    /// Ignored while the camera is fixed.
    pub fn pan_by(&mut self, delta: Vec2) {
        if self.fixed || delta == Vec2::ZERO {
            return;
        }
        self.view = Affine::translate(delta) * self.view;
        self.changed = true;
    }

    /// Zooms by `factor` around `anchor`, given in view space.
    ///
    /// The anchor stays fixed on screen. The resulting zoom is clamped into
    /// the configured limits. Ignored while the camera is fixed.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) {
        if self.fixed || factor <= 0.0 {
            return;
        }
        let old = self.scaling();
        let new = (old * factor).clamp(self.min_scaling, self.max_scaling);
        if (new - old).abs() < f64::EPSILON {
            return;
        }
        let factor = new / old;
        let anchor = anchor.to_vec2();
        self.view = Affine::translate(anchor)
            * Affine::scale(factor)
            * Affine::translate(-anchor)
            * self.view;
        self.changed = true;
    }
}

impl Camera for Camera2D {
    fn view(&self) -> Affine {
        self.view
    }

    fn scaling(&self) -> f64 {
        self.view.determinant().abs().sqrt()
    }

    fn look_at(&mut self, target: Point, distance: f64, rotation: f64) {
        debug_assert!(distance > 0.0, "camera distance must be positive");
        self.set_view(
            Affine::scale(1.0 / distance)
                * Affine::rotate(rotation)
                * Affine::translate(-target.to_vec2()),
        );
    }

    fn set_view(&mut self, view: Affine) {
        if self.view != view {
            self.view = view;
            self.changed = true;
        }
    }

    fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    fn is_fixed(&self) -> bool {
        self.fixed
    }

    fn tick(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }
}
