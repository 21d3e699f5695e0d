// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scatter_view --heading-base-level=0

//! Scatter View: canvas coordinate transforms and a 2D camera.
//!
//! This crate provides small, headless models for turning pointer positions
//! on a scatterplot canvas into data-space coordinates. It focuses on:
//! - The pixel → normalized device coordinate (NDC) → data space pipeline
//!   ([`CanvasTransform`]).
//! - The [`Camera`] contract the picking engine consumes: a view matrix, a
//!   zoom factor, a freeze flag, and per-frame change detection.
//! - A reference pan/zoom camera, [`Camera2D`].
//!
//! It does **not** render anything or listen to input events. Callers are
//! expected to:
//! - Feed canvas-relative pointer positions in pixels.
//! - Drive camera pan/zoom from their own wheel and drag handling.
//! - Re-derive data positions on every query, since the camera moves
//!   continuously.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use scatter_view::{Camera, Camera2D, CanvasTransform};
//!
//! // 800x600 canvas, data drawn with a 1:1 aspect ratio.
//! let canvas = CanvasTransform::new(800.0, 600.0);
//! let mut camera = Camera2D::new();
//! camera.look_at(Point::ZERO, 1.0, 0.0);
//!
//! // The canvas center is the data origin.
//! let data = canvas.pixel_to_data(Point::new(400.0, 300.0), camera.view());
//! assert!(data.x.abs() < 1e-12 && data.y.abs() < 1e-12);
//! ```
//!
//! ## Design notes
//!
//! - The view is a 2D affine transform. A 2D camera never mixes z or w into
//!   x and y, so this is exactly the x/y block of the usual 4×4 matrix.
//! - A non-invertible `projection * view * model` is a precondition
//!   violation, not an error: debug builds assert.
//!
//! This crate is `no_std`.

#![no_std]

mod camera;
mod transform;

pub use camera::{Camera, Camera2D};
pub use transform::CanvasTransform;
