// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;

/// Axis-aligned bounding box in 2D.
///
/// Bounds are closed: a point lying exactly on an edge is contained.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2D {
    /// Minimum x
    pub min_x: f64,
    /// Minimum y
    pub min_y: f64,
    /// Maximum x
    pub max_x: f64,
    /// Maximum y
    pub max_y: f64,
}

impl Aabb2D {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a square box of half-extent `dx`/`dy` centered on `(x, y)`.
    #[inline]
    pub fn around(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self::new(x - dx, y - dy, x + dx, y + dy)
    }

    /// The smallest box enclosing all `points`, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x, y) = iter.next()?;
        let mut bbox = Self::new(x, y, x, y);
        for (x, y) in iter {
            bbox.min_x = min_t(bbox.min_x, x);
            bbox.min_y = min_t(bbox.min_y, y);
            bbox.max_x = max_t(bbox.max_x, x);
            bbox.max_y = max_t(bbox.max_y, y);
        }
        Some(bbox)
    }

    /// Whether this AABB contains the point.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && self.min_y <= y && x <= self.max_x && y <= self.max_y
    }

    /// Return true if the box is inverted on either axis. Assumes no NaN.
    ///
    /// Unlike an area test, a degenerate box (a single point or a segment)
    /// is not empty: it can still contain points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}
