// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary to the external renderer.
//!
//! The engine never issues draw calls. Once per requested redraw it hands a
//! [`Frame`] to a [`Renderer`] and feeds vertex data to three [`LineDrawer`]s:
//! the lasso outline and the horizontal and vertical reticle lines. All line
//! vertices are in normalized device coordinates.

use kurbo::{Affine, Point};
use peniko::Color;

use crate::config::{ColorBy, ScatterConfig};
use crate::points::ScatterPoint;

/// Colour and width of a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke colour.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
}

impl LineStyle {
    /// Style of the lasso outline.
    #[must_use]
    pub fn lasso(config: &ScatterConfig) -> Self {
        Self {
            color: config.lasso_color(),
            width: 3.0,
        }
    }

    /// Style of the reticle lines.
    #[must_use]
    pub fn reticle(config: &ScatterConfig) -> Self {
        Self {
            color: config.reticle_color(),
            width: 1.0,
        }
    }
}

/// A polyline primitive provided by the embedder.
pub trait LineDrawer {
    /// Replaces the polyline vertices.
    fn set_points(&mut self, points: &[Point]);
    /// Changes the stroke style.
    fn set_style(&mut self, style: LineStyle);
    /// Draws the current polyline.
    fn draw(&mut self);
    /// Removes all vertices.
    fn clear(&mut self);
    /// Releases any resources. The drawer is not used afterwards.
    fn destroy(&mut self);
}

/// Effective point diameters for a frame, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointSizes {
    /// Body of every point.
    pub normal: f64,
    /// Body of selected and hovered points.
    pub selected: f64,
    /// Outer outline ring of selected and hovered points.
    pub outer_outline: f64,
    /// Inner (background coloured) outline ring.
    pub inner_outline: f64,
}

impl PointSizes {
    /// Sizes derived from `config`.
    #[must_use]
    pub fn from_config(config: &ScatterConfig) -> Self {
        let dpr = config.device_pixel_ratio();
        let selected = config.point_size_selected();
        let outline = config.point_outline_width();
        Self {
            normal: config.point_size() * dpr,
            selected,
            outer_outline: (selected + outline * 2.0) * dpr,
            inner_outline: (selected + outline) * dpr,
        }
    }
}

/// Everything the renderer needs to draw the points of one frame.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    /// All points in load order.
    pub points: &'a [ScatterPoint],
    /// Projection matrix.
    pub projection: Affine,
    /// Camera view matrix.
    pub view: Affine,
    /// Model matrix.
    pub model: Affine,
    /// Camera zoom factor.
    pub scaling: f64,
    /// The hovered point.
    pub hovered: Option<u32>,
    /// The selected points.
    pub selection: &'a [u32],
    /// Effective point sizes.
    pub sizes: PointSizes,
    /// Point colouring mode.
    pub color_by: ColorBy,
    /// Opacity of normal points.
    pub opacity: f32,
    /// Background colour, also used for the inner outline ring.
    pub background: Color,
}

/// Draws point frames.
pub trait Renderer {
    /// Draws one frame of points.
    fn draw_frame(&mut self, frame: &Frame<'_>);
}

/// Reticle lines through `ndc` spanning the whole canvas.
///
/// Returns the horizontal and the vertical line, each as two NDC vertices.
#[must_use]
pub fn reticle_lines(ndc: Point) -> ([Point; 2], [Point; 2]) {
    (
        [Point::new(-1.0, ndc.y), Point::new(1.0, ndc.y)],
        [Point::new(ndc.x, 1.0), Point::new(ndc.x, -1.0)],
    )
}
