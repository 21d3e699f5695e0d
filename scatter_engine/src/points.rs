// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use scatter_index::KdIndex;

/// One scatterplot point in data space.
///
/// The position in the loaded sequence is the point's identifier. Category
/// and value only affect colouring; the renderer treats missing ones as `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScatterPoint {
    /// Data-space x, nominally in `[-1, 1]`.
    pub x: f64,
    /// Data-space y, nominally in `[-1, 1]`.
    pub y: f64,
    /// Optional category.
    pub category: Option<u32>,
    /// Optional continuous value.
    pub value: Option<f64>,
}

impl ScatterPoint {
    /// A point without category or value.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            category: None,
            value: None,
        }
    }

    /// Returns this point with a category.
    #[must_use]
    pub const fn with_category(mut self, category: u32) -> Self {
        self.category = Some(category);
        self
    }

    /// Returns this point with a value.
    #[must_use]
    pub const fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

impl From<(f64, f64)> for ScatterPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for ScatterPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// A loaded point sequence together with its spatial index.
///
/// Immutable once built. Loading new points builds a new `PointSet` and swaps
/// it in whole.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: Vec<ScatterPoint>,
    index: KdIndex,
}

impl PointSet {
    /// Indexes `points`.
    pub fn new<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ScatterPoint>,
    {
        let points: Vec<ScatterPoint> = points.into_iter().map(Into::into).collect();
        let index = KdIndex::build(points.iter().map(|p| (p.x, p.y)));
        Self { points, index }
    }

    /// The points in load order.
    #[must_use]
    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    /// The point with identifier `id`.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&ScatterPoint> {
        self.points.get(id as usize)
    }

    /// The spatial index over the point positions.
    #[must_use]
    pub fn index(&self) -> &KdIndex {
        &self.index
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Identifiers of every point inside the data-space `polygon`.
    #[must_use]
    pub fn select_in_polygon(&self, polygon: &[kurbo::Point]) -> Vec<u32> {
        let polygon: Vec<(f64, f64)> = polygon.iter().map(|p| (p.x, p.y)).collect();
        self.index.query_polygon(&polygon)
    }
}
