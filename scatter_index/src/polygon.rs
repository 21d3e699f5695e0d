// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygon (lasso) queries.
//!
//! Containment uses the even-odd rule with a half-open crossing test: a
//! horizontal ray is cast from the query point towards `+x` and every edge
//! whose y-span contains the point's y in `[min, max)` flips the result. As a
//! consequence points exactly on a top or right edge are reported outside,
//! while points on a bottom or left edge may be reported inside. Polygons
//! are implicitly closed and need at least three vertices to contain
//! anything.

use alloc::vec::Vec;

use crate::index::KdIndex;
use crate::types::Aabb2D;

/// Returns `true` if `(x, y)` lies inside `polygon` under the even-odd rule.
pub fn point_in_polygon(x: f64, y: f64, polygon: &[(f64, f64)]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut prev = polygon[polygon.len() - 1];
    for &cur in polygon {
        let (xi, yi) = cur;
        let (xj, yj) = prev;
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        prev = cur;
    }
    inside
}

impl KdIndex {
    /// Identifiers of every point inside `polygon`.
    ///
    /// Candidates are first narrowed with a range query over the polygon's
    /// bounding box, then tested exactly with [`point_in_polygon`], so the
    /// per-vertex test never runs against points far away from the lasso.
    /// Order is unspecified.
    #[must_use]
    pub fn query_polygon(&self, polygon: &[(f64, f64)]) -> Vec<u32> {
        let mut out = Vec::new();
        if polygon.len() < 3 {
            return out;
        }
        let Some(bbox) = Aabb2D::from_points(polygon.iter().copied()) else {
            return out;
        };

        let positions = self.positions();
        self.visit_rect(bbox, |id| {
            let (x, y) = positions[id as usize];
            if point_in_polygon(x, y, polygon) {
                out.push(id);
            }
        });
        out
    }
}
