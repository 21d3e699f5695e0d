// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scatter_index --heading-base-level=0

//! Scatter Index: a static 2D point index for picking in large point clouds.
//!
//! - Build once from an ordered point sequence; a point's position in that
//!   sequence is its identifier.
//! - Query all points inside a closed axis-aligned box.
//! - Query all points inside a freehand polygon (lasso), pruned by the
//!   polygon's bounding box before the exact even-odd test.
//!
//! The index is immutable after [`KdIndex::build`]. Loading a new point set
//! means building a new index and swapping it in; there is no incremental
//! insert or remove. Because nothing mutates after build, a built index can be
//! shared freely between readers.
//!
//! It does not depend on any geometry crate: coordinates are plain `f64`
//! pairs. Higher layers convert pointer positions into this data space.
//!
//! # Example
//!
//! ```rust
//! use scatter_index::{Aabb2D, KdIndex};
//!
//! let idx = KdIndex::build([(0.0, 0.0), (0.9, 0.9), (-0.9, -0.9)]);
//!
//! // Closed box query.
//! let mut hits = idx.query_rect(Aabb2D::new(-1.0, -1.0, 0.0, 0.0));
//! hits.sort_unstable();
//! assert_eq!(hits, [0, 2]);
//!
//! // Lasso query.
//! let lasso = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];
//! assert_eq!(idx.query_polygon(&lasso), [0]);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for coordinates. Debug builds assert.

#![no_std]

extern crate alloc;

mod index;
mod polygon;
mod types;

pub use index::{DEFAULT_NODE_SIZE, KdIndex};
pub use polygon::point_in_polygon;
pub use types::Aabb2D;
