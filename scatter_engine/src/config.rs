// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! [`ScatterConfig`] holds every recognized option. Setters validate their
//! input: an out-of-range value is ignored, the previous value is kept, and
//! the rejection is logged at debug level. Nothing is surfaced to the caller.
//!
//! [`ConfigUpdate`] collects a partial update that [`ScatterConfig::apply`]
//! (or `Engine::set`) applies in one go.

use kurbo::{Affine, Point};
use peniko::Color;

/// Default point diameter in pixels.
pub const DEFAULT_POINT_SIZE: f64 = 6.0;
/// Default diameter of selected points in pixels.
pub const DEFAULT_POINT_SIZE_SELECTED: f64 = 2.0;
/// Default outline width around selected points in pixels.
pub const DEFAULT_POINT_OUTLINE_WIDTH: f64 = 2.0;
/// Default minimum delay between lasso samples in milliseconds.
pub const LASSO_MIN_DELAY: u64 = 8;
/// Default minimum pixel distance between lasso vertices.
pub const LASSO_MIN_DIST: f64 = 2.0;
/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: f64 = 100.0;
/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: f64 = 100.0;
/// Default data aspect ratio.
pub const DEFAULT_DATA_ASPECT_RATIO: f64 = 1.0;
/// Default lasso outline colour.
pub const DEFAULT_LASSO_COLOR: Color = Color::new([0.0, 0.666_666_7, 1.0, 1.0]);
/// Default reticle colour.
pub const DEFAULT_RETICLE_COLOR: Color = Color::new([1.0, 1.0, 1.0, 0.5]);
/// Default background colour.
pub const DEFAULT_BACKGROUND: Color = Color::new([1.0, 1.0, 1.0, 1.0]);

/// How the renderer colours point bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorBy {
    /// One colour for every point.
    #[default]
    Uniform,
    /// Colour by the point's category.
    Category,
    /// Colour by the point's value.
    Value,
}

/// Where the camera starts, and where [`Engine::reset`] returns it.
///
/// An explicit `view` takes precedence over `target`/`distance`/`rotation`.
///
/// [`Engine::reset`]: crate::Engine::reset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialCamera {
    /// Data-space point the camera looks at.
    pub target: Point,
    /// Camera distance; larger values zoom out.
    pub distance: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Explicit view matrix.
    pub view: Option<Affine>,
}

impl Default for InitialCamera {
    fn default() -> Self {
        Self {
            target: Point::ZERO,
            distance: 1.0,
            rotation: 0.0,
            view: None,
        }
    }
}

/// Recognized engine options.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterConfig {
    point_size: f64,
    point_size_selected: f64,
    point_outline_width: f64,
    lasso_min_delay: u64,
    lasso_min_dist: f64,
    click_max_dist: f64,
    width: f64,
    height: f64,
    aspect_ratio: f64,
    device_pixel_ratio: f64,
    show_reticle: bool,
    lasso_color: Color,
    reticle_color: Color,
    background: Color,
    opacity: f32,
    color_by: ColorBy,
    initial_camera: InitialCamera,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            point_size: DEFAULT_POINT_SIZE,
            point_size_selected: DEFAULT_POINT_SIZE_SELECTED,
            point_outline_width: DEFAULT_POINT_OUTLINE_WIDTH,
            lasso_min_delay: LASSO_MIN_DELAY,
            lasso_min_dist: LASSO_MIN_DIST,
            click_max_dist: LASSO_MIN_DIST,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            aspect_ratio: DEFAULT_DATA_ASPECT_RATIO,
            device_pixel_ratio: 1.0,
            show_reticle: false,
            lasso_color: DEFAULT_LASSO_COLOR,
            reticle_color: DEFAULT_RETICLE_COLOR,
            background: DEFAULT_BACKGROUND,
            opacity: 1.0,
            color_by: ColorBy::Uniform,
            initial_camera: InitialCamera::default(),
        }
    }
}

fn accept_positive(name: &str, value: f64) -> bool {
    let ok = value.is_finite() && value > 0.0;
    if !ok {
        log::debug!("ignoring {name} = {value}: must be positive");
    }
    ok
}

fn accept_non_negative(name: &str, value: f64) -> bool {
    let ok = value.is_finite() && value >= 0.0;
    if !ok {
        log::debug!("ignoring {name} = {value}: must not be negative");
    }
    ok
}

impl ScatterConfig {
    /// Creates a configuration with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this configuration with a different canvas size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.set_width(width);
        self.set_height(height);
        self
    }

    /// Returns this configuration with a different initial camera.
    #[must_use]
    pub fn with_initial_camera(mut self, camera: InitialCamera) -> Self {
        self.initial_camera = camera;
        self
    }

    /// Point diameter in pixels.
    #[must_use]
    pub fn point_size(&self) -> f64 {
        self.point_size
    }

    /// Diameter of selected points in pixels.
    #[must_use]
    pub fn point_size_selected(&self) -> f64 {
        self.point_size_selected
    }

    /// Outline width around selected points in pixels.
    #[must_use]
    pub fn point_outline_width(&self) -> f64 {
        self.point_outline_width
    }

    /// Minimum delay between lasso samples in milliseconds.
    #[must_use]
    pub fn lasso_min_delay(&self) -> u64 {
        self.lasso_min_delay
    }

    /// Minimum pixel distance between lasso vertices.
    #[must_use]
    pub fn lasso_min_dist(&self) -> f64 {
        self.lasso_min_dist
    }

    /// Largest press-to-click travel in pixels still treated as a click.
    #[must_use]
    pub fn click_max_dist(&self) -> f64 {
        self.click_max_dist
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Data aspect ratio.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Ratio of device pixels to canvas pixels.
    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Whether the reticle is drawn through the hovered point.
    #[must_use]
    pub fn show_reticle(&self) -> bool {
        self.show_reticle
    }

    /// Lasso outline colour.
    #[must_use]
    pub fn lasso_color(&self) -> Color {
        self.lasso_color
    }

    /// Reticle line colour.
    #[must_use]
    pub fn reticle_color(&self) -> Color {
        self.reticle_color
    }

    /// Background colour.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Opacity of unselected, unhovered points.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Point colouring mode.
    #[must_use]
    pub fn color_by(&self) -> ColorBy {
        self.color_by
    }

    /// Initial camera placement.
    #[must_use]
    pub fn initial_camera(&self) -> &InitialCamera {
        &self.initial_camera
    }

    /// Sets the point diameter. Must be positive.
    pub fn set_point_size(&mut self, value: f64) {
        if accept_positive("point_size", value) {
            self.point_size = value;
        }
    }

    /// Sets the selected point diameter. Must not be negative.
    pub fn set_point_size_selected(&mut self, value: f64) {
        if accept_non_negative("point_size_selected", value) {
            self.point_size_selected = value;
        }
    }

    /// Sets the selected point outline width. Must not be negative.
    pub fn set_point_outline_width(&mut self, value: f64) {
        if accept_non_negative("point_outline_width", value) {
            self.point_outline_width = value;
        }
    }

    /// Sets the lasso sample delay. Must be positive.
    pub fn set_lasso_min_delay(&mut self, value: u64) {
        if value == 0 {
            log::debug!("ignoring lasso_min_delay = 0: must be positive");
            return;
        }
        self.lasso_min_delay = value;
    }

    /// Sets the lasso vertex distance. Must be positive.
    pub fn set_lasso_min_dist(&mut self, value: f64) {
        if accept_positive("lasso_min_dist", value) {
            self.lasso_min_dist = value;
        }
    }

    /// Sets the click tolerance. Must be positive.
    pub fn set_click_max_dist(&mut self, value: f64) {
        if accept_positive("click_max_dist", value) {
            self.click_max_dist = value;
        }
    }

    /// Sets the canvas width. Must be positive.
    pub fn set_width(&mut self, value: f64) {
        if accept_positive("width", value) {
            self.width = value;
        }
    }

    /// Sets the canvas height. Must be positive.
    pub fn set_height(&mut self, value: f64) {
        if accept_positive("height", value) {
            self.height = value;
        }
    }

    /// Sets the data aspect ratio. Must be positive.
    pub fn set_aspect_ratio(&mut self, value: f64) {
        if accept_positive("aspect_ratio", value) {
            self.aspect_ratio = value;
        }
    }

    /// Sets the device pixel ratio. Must be positive.
    pub fn set_device_pixel_ratio(&mut self, value: f64) {
        if accept_positive("device_pixel_ratio", value) {
            self.device_pixel_ratio = value;
        }
    }

    /// Shows or hides the reticle.
    pub fn set_show_reticle(&mut self, value: bool) {
        self.show_reticle = value;
    }

    /// Sets the lasso colour.
    pub fn set_lasso_color(&mut self, value: Color) {
        self.lasso_color = value;
    }

    /// Sets the reticle colour.
    pub fn set_reticle_color(&mut self, value: Color) {
        self.reticle_color = value;
    }

    /// Sets the background colour.
    pub fn set_background(&mut self, value: Color) {
        self.background = value;
    }

    /// Sets the opacity of normal points. Must be in `(0, 1]`.
    pub fn set_opacity(&mut self, value: f32) {
        if !(value > 0.0 && value <= 1.0) {
            log::debug!("ignoring opacity = {value}: must be in (0, 1]");
            return;
        }
        self.opacity = value;
    }

    /// Sets the point colouring mode.
    pub fn set_color_by(&mut self, value: ColorBy) {
        self.color_by = value;
    }

    /// Applies every option present in `update`, validating each one.
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(v) = update.point_size {
            self.set_point_size(v);
        }
        if let Some(v) = update.point_size_selected {
            self.set_point_size_selected(v);
        }
        if let Some(v) = update.point_outline_width {
            self.set_point_outline_width(v);
        }
        if let Some(v) = update.lasso_min_delay {
            self.set_lasso_min_delay(v);
        }
        if let Some(v) = update.lasso_min_dist {
            self.set_lasso_min_dist(v);
        }
        if let Some(v) = update.click_max_dist {
            self.set_click_max_dist(v);
        }
        if let Some(v) = update.width {
            self.set_width(v);
        }
        if let Some(v) = update.height {
            self.set_height(v);
        }
        if let Some(v) = update.aspect_ratio {
            self.set_aspect_ratio(v);
        }
        if let Some(v) = update.device_pixel_ratio {
            self.set_device_pixel_ratio(v);
        }
        if let Some(v) = update.show_reticle {
            self.set_show_reticle(v);
        }
        if let Some(v) = update.lasso_color {
            self.set_lasso_color(v);
        }
        if let Some(v) = update.reticle_color {
            self.set_reticle_color(v);
        }
        if let Some(v) = update.background {
            self.set_background(v);
        }
        if let Some(v) = update.opacity {
            self.set_opacity(v);
        }
        if let Some(v) = update.color_by {
            self.set_color_by(v);
        }
    }
}

/// A partial configuration change.
///
/// ```
/// use scatter_engine::{ConfigUpdate, ScatterConfig};
///
/// let mut config = ScatterConfig::new();
/// config.apply(&ConfigUpdate::new().point_size(10.0).width(-5.0));
///
/// assert_eq!(config.point_size(), 10.0);
/// // Rejected, the previous width is kept.
/// assert_eq!(config.width(), 100.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigUpdate {
    point_size: Option<f64>,
    point_size_selected: Option<f64>,
    point_outline_width: Option<f64>,
    lasso_min_delay: Option<u64>,
    lasso_min_dist: Option<f64>,
    click_max_dist: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    aspect_ratio: Option<f64>,
    device_pixel_ratio: Option<f64>,
    show_reticle: Option<bool>,
    lasso_color: Option<Color>,
    reticle_color: Option<Color>,
    background: Option<Color>,
    opacity: Option<f32>,
    color_by: Option<ColorBy>,
}

macro_rules! update_setters {
    ($($(#[$doc:meta])* $name:ident: $ty:ty,)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(mut self, value: $ty) -> Self {
                self.$name = Some(value);
                self
            }
        )*
    };
}

impl ConfigUpdate {
    /// An update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the update carries no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if the update touches a line colour.
    #[must_use]
    pub fn touches_line_style(&self) -> bool {
        self.lasso_color.is_some() || self.reticle_color.is_some()
    }

    update_setters! {
        /// Sets the point diameter.
        point_size: f64,
        /// Sets the selected point diameter.
        point_size_selected: f64,
        /// Sets the selected point outline width.
        point_outline_width: f64,
        /// Sets the lasso sample delay in milliseconds.
        lasso_min_delay: u64,
        /// Sets the lasso vertex distance in pixels.
        lasso_min_dist: f64,
        /// Sets the click tolerance in pixels.
        click_max_dist: f64,
        /// Sets the canvas width.
        width: f64,
        /// Sets the canvas height.
        height: f64,
        /// Sets the data aspect ratio.
        aspect_ratio: f64,
        /// Sets the device pixel ratio.
        device_pixel_ratio: f64,
        /// Shows or hides the reticle.
        show_reticle: bool,
        /// Sets the lasso colour.
        lasso_color: Color,
        /// Sets the reticle colour.
        reticle_color: Color,
        /// Sets the background colour.
        background: Color,
        /// Sets the opacity of normal points.
        opacity: f32,
        /// Sets the point colouring mode.
        color_by: ColorBy,
    }
}
