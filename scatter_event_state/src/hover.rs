// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: turn per-move hit results into point-over and
//! point-out transitions.
//!
//! A scatterplot has at most one hovered point. Feeding the latest hit result
//! to [`HoverState::update`] reports:
//! - [`HoverEvent::Over`] when a point is hit that differs from the current one.
//! - [`HoverEvent::Out`] when nothing is hit and a point was hovered.
//!
//! Moving directly from one point to another reports only the `Over` of the
//! new point. Listeners that care about the previous point track it from the
//! preceding `Over`.
//!
//! ## Minimal example
//!
//! ```
//! use scatter_event_state::hover::{HoverEvent, HoverState};
//!
//! let mut hover = HoverState::new();
//! assert_eq!(hover.update(Some(3)), Some(HoverEvent::Over(3)));
//! assert_eq!(hover.update(Some(3)), None);
//! assert_eq!(hover.update(Some(5)), Some(HoverEvent::Over(5)));
//! assert_eq!(hover.update(None), Some(HoverEvent::Out(5)));
//! assert_eq!(hover.update(None), None);
//! ```

/// Hover transition for a single point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// The pointer is now over this point.
    Over(u32),
    /// The pointer left this point without reaching another.
    Out(u32),
}

/// The currently hovered point, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<u32>,
}

impl HoverState {
    /// Creates a state with nothing hovered.
    #[must_use]
    pub const fn new() -> Self {
        Self { hovered: None }
    }

    /// The hovered point.
    #[must_use]
    pub fn current(&self) -> Option<u32> {
        self.hovered
    }

    /// Applies the latest hit result and returns the transition, if any.
    pub fn update(&mut self, hit: Option<u32>) -> Option<HoverEvent> {
        match (hit, self.hovered) {
            (Some(new), Some(old)) if new == old => None,
            (Some(new), _) => {
                self.hovered = Some(new);
                Some(HoverEvent::Over(new))
            }
            (None, Some(old)) => {
                self.hovered = None;
                Some(HoverEvent::Out(old))
            }
            (None, None) => None,
        }
    }

    /// Forgets the hovered point without reporting a transition.
    pub fn clear(&mut self) {
        self.hovered = None;
    }
}
