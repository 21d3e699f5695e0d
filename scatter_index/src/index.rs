// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static kd-sorted point index.

use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::types::Aabb2D;

/// Default number of points per leaf, matching the usual kd-bush tuning.
pub const DEFAULT_NODE_SIZE: usize = 16;

/// An indexed point in kd order: input index plus coordinates.
#[derive(Copy, Clone, Debug)]
struct Entry {
    id: u32,
    x: f64,
    y: f64,
}

impl Entry {
    #[inline(always)]
    fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline(always)]
    fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// A static 2D index over an ordered point sequence.
///
/// The index is built once from every point of a point set and is immutable
/// afterwards; a new point set requires building a new index. Points keep the
/// position they had in the source sequence as their identifier.
///
/// Internally the points are stored as an implicit kd-tree: the sequence is
/// recursively partitioned around its median, alternating between the x and y
/// axis, until a range holds at most `node_size` points. Building is
/// `O(n log n)`; a range query returning `k` points is `O(log n + k)` for
/// well-distributed data.
#[derive(Clone)]
pub struct KdIndex {
    node_size: usize,
    /// Points in kd order.
    entries: Vec<Entry>,
    /// Points in source order, for lookups by identifier.
    positions: Vec<(f64, f64)>,
}

impl Debug for KdIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdIndex")
            .field("len", &self.entries.len())
            .field("node_size", &self.node_size)
            .finish_non_exhaustive()
    }
}

impl Default for KdIndex {
    fn default() -> Self {
        Self::build(core::iter::empty())
    }
}

impl KdIndex {
    /// Build an index over `points` with the default leaf size.
    ///
    /// The n-th item of `points` is addressable as identifier `n`.
    pub fn build<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::build_with_node_size(points, DEFAULT_NODE_SIZE)
    }

    /// Build an index over `points` with an explicit leaf size.
    ///
    /// Smaller leaves make queries descend further; larger leaves make them
    /// scan more. `node_size` is clamped to at least 1.
    pub fn build_with_node_size<I>(points: I, node_size: usize) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let positions: Vec<(f64, f64)> = points.into_iter().collect();
        debug_assert!(
            u32::try_from(positions.len()).is_ok(),
            "point identifiers are 32-bit"
        );
        debug_assert!(
            positions.iter().all(|(x, y)| !x.is_nan() && !y.is_nan()),
            "point coordinates must not be NaN"
        );

        #[allow(
            clippy::cast_possible_truncation,
            reason = "Point identifiers are 32-bit; checked by the debug assertion above."
        )]
        let mut entries: Vec<Entry> = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Entry { id: i as u32, x, y })
            .collect();

        let node_size = node_size.max(1);
        sort_kd(&mut entries, node_size, Axis::X);

        Self {
            node_size,
            entries,
            positions,
        }
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Coordinates of the point with identifier `id`.
    #[must_use]
    pub fn position(&self, id: u32) -> Option<(f64, f64)> {
        self.positions.get(id as usize).copied()
    }

    /// All coordinates in source order.
    #[must_use]
    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    /// Bounding box of every indexed point, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb2D> {
        Aabb2D::from_points(self.positions.iter().copied())
    }

    /// Visit the identifier of every point inside the closed box `rect`.
    ///
    /// Visit order is unspecified.
    pub fn visit_rect<F: FnMut(u32)>(&self, rect: Aabb2D, mut f: F) {
        if self.entries.is_empty() || rect.is_empty() {
            return;
        }

        let mut stack: SmallVec<[(usize, usize, Axis); 32]> = SmallVec::new();
        stack.push((0, self.entries.len(), Axis::X));

        while let Some((lo, hi, axis)) = stack.pop() {
            if hi - lo <= self.node_size {
                for e in &self.entries[lo..hi] {
                    if rect.contains_point(e.x, e.y) {
                        f(e.id);
                    }
                }
                continue;
            }

            let mid = lo + (hi - lo) / 2;
            let e = self.entries[mid];
            if rect.contains_point(e.x, e.y) {
                f(e.id);
            }

            let split = e.coord(axis);
            let (min, max) = match axis {
                Axis::X => (rect.min_x, rect.max_x),
                Axis::Y => (rect.min_y, rect.max_y),
            };
            if min <= split {
                stack.push((lo, mid, axis.next()));
            }
            if max >= split {
                stack.push((mid + 1, hi, axis.next()));
            }
        }
    }

    /// Identifiers of every point inside the closed box `rect`.
    ///
    /// Order is unspecified. See [`KdIndex::visit_rect`] for a non-allocating form.
    #[must_use]
    pub fn query_rect(&self, rect: Aabb2D) -> Vec<u32> {
        let mut out = Vec::new();
        self.visit_rect(rect, |id| out.push(id));
        out
    }

    /// Identifiers of every point inside `[min_x, max_x] x [min_y, max_y]`.
    #[must_use]
    pub fn range(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<u32> {
        self.query_rect(Aabb2D::new(min_x, min_y, max_x, max_y))
    }
}

/// Recursively partition `entries` around medians, alternating axes.
///
/// After this, for every range wider than `node_size` with midpoint `mid`,
/// entries before `mid` are `<=` and entries after `mid` are `>=` the entry at
/// `mid` on that level's axis. Queries rely on this exact midpoint rule.
fn sort_kd(entries: &mut [Entry], node_size: usize, axis: Axis) {
    if entries.len() <= node_size {
        return;
    }
    let mid = entries.len() / 2;
    entries.select_nth_unstable_by(mid, |a, b| a.coord(axis).total_cmp(&b.coord(axis)));
    let (left, rest) = entries.split_at_mut(mid);
    sort_kd(left, node_size, axis.next());
    sort_kd(&mut rest[1..], node_size, axis.next());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index_answers_empty() {
        let idx = KdIndex::build(core::iter::empty());
        assert!(idx.is_empty());
        assert!(idx.range(-1.0, -1.0, 1.0, 1.0).is_empty());
        assert!(idx.bounds().is_none());
        assert_eq!(idx.position(0), None);
    }

    #[test]
    fn small_set_stays_in_one_leaf() {
        let idx = KdIndex::build([(0.0, 0.0), (0.5, 0.5), (-0.5, 0.25)]);
        let mut hits = idx.range(-0.6, 0.0, 0.1, 0.3);
        hits.sort_unstable();
        assert_eq!(hits, [0, 2]);
    }

    #[test]
    fn points_on_the_box_edge_are_included() {
        let idx = KdIndex::build_with_node_size((0..64).map(|i| (f64::from(i), 0.0)), 2);
        let mut hits = idx.range(10.0, 0.0, 12.0, 0.0);
        hits.sort_unstable();
        assert_eq!(hits, [10, 11, 12]);
    }

    #[test]
    fn duplicate_coordinates_are_all_reported() {
        let idx = KdIndex::build_with_node_size(core::iter::repeat_n((0.25, 0.25), 40), 4);
        assert_eq!(idx.range(0.25, 0.25, 0.25, 0.25).len(), 40);
    }

    #[test]
    fn inverted_box_matches_nothing() {
        let idx = KdIndex::build([(0.0, 0.0)]);
        assert!(idx.range(1.0, 1.0, -1.0, -1.0).is_empty());
    }
}
