// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point};

/// Coordinate pipeline between canvas pixels, normalized device coordinates,
/// and data space.
///
/// - **Pixels**: canvas-relative pointer position, origin top-left, y down.
/// - **NDC**: the canvas mapped onto `[-1, 1]²`, y up.
/// - **Data**: point coordinates, related to NDC by
///   `projection * view * model`.
///
/// The projection undoes the canvas aspect ratio (x is scaled by
/// `height / width`) and the model applies the data aspect ratio (x is scaled
/// by `data_aspect_ratio`). The camera `view` is passed to every conversion
/// rather than stored, since it changes continuously while the user pans and
/// zooms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransform {
    width: f64,
    height: f64,
    data_aspect_ratio: f64,
}

impl CanvasTransform {
    /// Creates a transform for a `width` × `height` pixel canvas with a data
    /// aspect ratio of `1.0`.
    ///
    /// Both dimensions must be positive.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "canvas size must be positive");
        Self {
            width,
            height,
            data_aspect_ratio: 1.0,
        }
    }

    /// Returns this transform with a different data aspect ratio.
    #[must_use]
    pub fn with_data_aspect_ratio(mut self, ratio: f64) -> Self {
        debug_assert!(ratio > 0.0, "data aspect ratio must be positive");
        self.data_aspect_ratio = ratio;
        self
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

    /// Data aspect ratio applied by the model matrix.
    #[must_use]
    pub fn data_aspect_ratio(&self) -> f64 {
        self.data_aspect_ratio
    }

    /// `width / height`.
    #[must_use]
    pub fn view_aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Projection matrix: scales x by the inverse of the view aspect ratio.
    #[must_use]
    pub fn projection(&self) -> Affine {
        Affine::scale_non_uniform(1.0 / self.view_aspect_ratio(), 1.0)
    }

    /// Model matrix: scales x by the data aspect ratio.
    #[must_use]
    pub fn model(&self) -> Affine {
        Affine::scale_non_uniform(self.data_aspect_ratio, 1.0)
    }

    /// `projection * view * model`: maps data space into NDC.
    #[must_use]
    pub fn data_to_ndc_transform(&self, view: Affine) -> Affine {
        self.projection() * view * self.model()
    }

    /// Converts a canvas pixel position into NDC.
    #[must_use]
    pub fn pixel_to_ndc(&self, px: Point) -> Point {
        Point::new(
            -1.0 + 2.0 * px.x / self.width,
            1.0 - 2.0 * px.y / self.height,
        )
    }

    /// Converts an NDC position back into canvas pixels.
    #[must_use]
    pub fn ndc_to_pixel(&self, ndc: Point) -> Point {
        Point::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }

    /// Converts an NDC position into data space under `view`.
    ///
    /// The combined matrix must be invertible. A degenerate camera (for
    /// example a zero scale) is a caller bug: debug builds assert and release
    /// builds return an unspecified point.
    #[must_use]
    pub fn ndc_to_data(&self, ndc: Point, view: Affine) -> Point {
        let mvp = self.data_to_ndc_transform(view);
        debug_assert!(
            mvp.determinant() != 0.0,
            "projection * view * model must be invertible"
        );
        mvp.inverse() * ndc
    }

    /// Converts a data-space position into NDC under `view`.
    #[must_use]
    pub fn data_to_ndc(&self, data: Point, view: Affine) -> Point {
        self.data_to_ndc_transform(view) * data
    }

    /// Converts a canvas pixel position into data space under `view`.
    #[must_use]
    pub fn pixel_to_data(&self, px: Point, view: Affine) -> Point {
        self.ndc_to_data(self.pixel_to_ndc(px), view)
    }

    /// Converts a data-space position into canvas pixels under `view`.
    #[must_use]
    pub fn data_to_pixel(&self, data: Point, view: Affine) -> Point {
        self.ndc_to_pixel(self.data_to_ndc(data, view))
    }
}
