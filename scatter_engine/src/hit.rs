// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing.

use kurbo::Point;
use scatter_index::{Aabb2D, KdIndex};

/// Inputs to [`raycast`] besides the index and the query position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastParams {
    /// Base point diameter in pixels.
    pub point_size: f64,
    /// Camera zoom factor.
    pub scaling: f64,
    /// Device pixels per canvas pixel.
    pub device_pixel_ratio: f64,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
}

/// Search radius in pixels for a point of `point_size` at zoom `scaling`.
///
/// Points shrink below unit zoom and grow logarithmically above it.
#[must_use]
pub fn scaled_point_size(point_size: f64, scaling: f64, device_pixel_ratio: f64) -> f64 {
    2.0 * point_size * (scaling.min(1.0) + scaling.max(1.0).log2()) * device_pixel_ratio
}

/// Finds the point under the data-space position `at`.
///
/// Candidates come from a box query sized by [`scaled_point_size`]. The
/// nearest candidate wins if it lies closer than `2 * point_size / width`;
/// otherwise nothing is hit. Ties keep the first candidate visited.
#[must_use]
pub fn raycast(index: &KdIndex, at: Point, params: &RaycastParams) -> Option<u32> {
    let radius = scaled_point_size(params.point_size, params.scaling, params.device_pixel_ratio);
    let query = Aabb2D::around(at.x, at.y, radius / params.width, radius / params.height);

    let positions = index.positions();
    let mut nearest: Option<(u32, f64)> = None;
    index.visit_rect(query, |id| {
        let (x, y) = positions[id as usize];
        let d = (x - at.x).hypot(y - at.y);
        if nearest.is_none_or(|(_, best)| d < best) {
            nearest = Some((id, d));
        }
    });

    let threshold = 2.0 * params.point_size / params.width;
    nearest.and_then(|(id, d)| (d < threshold).then_some(id))
}
