// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scatter_engine --heading-base-level=0

//! Scatter Engine: headless point picking and selection for interactive scatterplots.
//!
//! This crate ties the workspace together into one [`Engine`]:
//! - Points are indexed by `scatter_index` on [`Engine::load`].
//! - Pointer pixels become data-space positions through `scatter_view`.
//! - Hover and click run a [`hit::raycast`] against the index.
//! - A shift-drag draws a throttled lasso (`scatter_event_state`) that commits
//!   an even-odd polygon query as the new selection.
//! - Changes are announced on a [`PubSub`] bus and coalesced into at most one
//!   draw per [`Engine::frame`].
//!
//! Rendering is external: the embedder supplies a [`Camera`], a
//! [`LineDrawer`] factory, and a [`Renderer`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use scatter_engine::{
//!     Engine, Frame, LineDrawer, LineStyle, Modifiers, Renderer, ScatterConfig,
//! };
//! use scatter_view::Camera2D;
//!
//! #[derive(Debug, Default)]
//! struct NoLine;
//!
//! impl LineDrawer for NoLine {
//!     fn set_points(&mut self, _: &[Point]) {}
//!     fn set_style(&mut self, _: LineStyle) {}
//!     fn draw(&mut self) {}
//!     fn clear(&mut self) {}
//!     fn destroy(&mut self) {}
//! }
//!
//! struct NoRenderer;
//!
//! impl Renderer for NoRenderer {
//!     fn draw_frame(&mut self, _: &Frame<'_>) {}
//! }
//!
//! // 100x100 canvas; pixel (50, 50) is the data origin.
//! let mut engine = Engine::new(ScatterConfig::default(), Camera2D::new(), |_| NoLine);
//! engine.load([(0.0, 0.0), (0.5, 0.5)]);
//!
//! engine.on_pointer_enter();
//! engine.on_pointer_move(Point::new(50.0, 50.0), 0);
//! assert_eq!(engine.hovered(), Some(0));
//!
//! engine.on_pointer_down(Point::new(50.0, 50.0), Modifiers::empty());
//! engine.on_pointer_up();
//! engine.on_click(Point::new(50.0, 50.0));
//! assert_eq!(engine.selection(), &[0]);
//!
//! assert!(engine.frame(16, &mut NoRenderer));
//! assert!(!engine.frame(32, &mut NoRenderer));
//! ```
//!
//! ## Coordinate spaces
//!
//! Pointer positions are canvas-relative pixels with the origin top-left.
//! Lasso and reticle vertices handed to line drawers are normalized device
//! coordinates. Point positions, the lasso polygon, and hit testing are in
//! data space.

mod bus;
mod config;
mod engine;
pub mod hit;
mod points;
mod render;

pub use bus::{Event, PubSub, SubscriptionId, Topic};
pub use config::{
    ColorBy, ConfigUpdate, DEFAULT_BACKGROUND, DEFAULT_DATA_ASPECT_RATIO, DEFAULT_HEIGHT,
    DEFAULT_LASSO_COLOR, DEFAULT_POINT_OUTLINE_WIDTH, DEFAULT_POINT_SIZE,
    DEFAULT_POINT_SIZE_SELECTED, DEFAULT_RETICLE_COLOR, DEFAULT_WIDTH, InitialCamera,
    LASSO_MIN_DELAY, LASSO_MIN_DIST, ScatterConfig,
};
pub use engine::{Engine, Modifiers};
pub use points::{PointSet, ScatterPoint};
pub use render::{Frame, LineDrawer, LineStyle, PointSizes, Renderer, reticle_lines};
pub use scatter_view::Camera;
