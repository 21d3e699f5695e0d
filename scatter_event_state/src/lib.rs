// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scatter_event_state --heading-base-level=0

//! Scatter Event State: small state machines for scatterplot pointer interactions.
//!
//! Each module handles one interaction pattern that needs state across events:
//!
//! - [`press`]: Remember where the primary button went down and measure travel
//!   from it, to tell clicks from drags.
//! - [`hover`]: Turn per-move hit results into point-over and point-out
//!   transitions.
//! - [`throttle`]: Leading-edge rate limiting with a guaranteed trailing call.
//! - [`lasso`]: Accumulate a freehand polygon from throttled, distance-gated
//!   pointer samples.
//!
//! ## Design Philosophy
//!
//! - **Headless**: nothing here listens to events, reads clocks, or draws.
//!   Callers pass positions and millisecond timestamps explicitly.
//! - **Pre-computed inputs**: hit testing and coordinate conversion happen
//!   elsewhere. These managers accept point indices and [`lasso::LassoSample`]s.
//! - **Poll-driven time**: delayed work (the trailing lasso sample) is applied
//!   when the caller polls with the current time, typically once per frame.
//!
//! ## Usage Patterns
//!
//! ### Click or drag
//!
//! ```rust
//! use kurbo::Point;
//! use scatter_event_state::press::PressState;
//!
//! let mut press = PressState::default();
//! press.press(Point::new(10.0, 10.0));
//! press.release();
//!
//! // A click is a release close to where the press started.
//! let is_click = press.travel(Point::new(11.0, 10.0)).is_some_and(|d| d < 2.0);
//! assert!(is_click);
//! ```
//!
//! ### Hover transitions
//!
//! ```rust
//! use scatter_event_state::hover::{HoverEvent, HoverState};
//!
//! let mut hover = HoverState::new();
//! assert_eq!(hover.update(Some(4)), Some(HoverEvent::Over(4)));
//! assert_eq!(hover.update(None), Some(HoverEvent::Out(4)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod hover;
pub mod lasso;
pub mod press;
pub mod throttle;
