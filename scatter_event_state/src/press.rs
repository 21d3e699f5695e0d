// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press state helper: remember where the primary button went down and how far
//! the pointer has travelled since.
//!
//! ## Usage
//!
//! 1) Call [`PressState::press`] on pointer-down with the pointer position.
//! 2) On each move, call [`PressState::update`] to get the movement delta since
//!    the last update while the button is held.
//! 3) Call [`PressState::release`] on pointer-up. The press origin is kept so
//!    that a click arriving after the release can still measure
//!    [`PressState::travel`] from it.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use scatter_event_state::press::PressState;
//!
//! let mut press = PressState::default();
//!
//! press.press(Point::new(10.0, 20.0));
//! assert!(press.is_held());
//!
//! let delta = press.update(Point::new(13.0, 24.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (3.0, 4.0));
//!
//! press.release();
//! assert!(!press.is_held());
//!
//! // The click handler runs after release and still sees the origin.
//! assert_eq!(press.travel(Point::new(13.0, 24.0)), Some(5.0));
//! ```

use kurbo::{Point, Vec2};

/// Tracks the primary button between press, moves, and release.
#[derive(Debug, Clone, Default, Copy)]
pub struct PressState {
    /// Where the last press started, kept across release.
    pub down_pos: Option<Point>,
    /// Last pointer position recorded while held.
    pub last_pos: Option<Point>,
    held: bool,
}

impl PressState {
    /// Records a press at `pos`, replacing any previous origin.
    pub fn press(&mut self, pos: Point) {
        self.down_pos = Some(pos);
        self.last_pos = Some(pos);
        self.held = true;
    }

    /// Updates the pointer position, returning the delta since the last update
    /// while the button is held.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        if !self.held {
            return None;
        }
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Releases the button. Returns `true` if it was held.
    pub fn release(&mut self) -> bool {
        let was_held = self.held;
        self.held = false;
        self.last_pos = None;
        was_held
    }

    /// Distance from the last press origin to `pos`.
    pub fn travel(&self, pos: Point) -> Option<f64> {
        self.down_pos.map(|down| (pos - down).hypot())
    }

    /// Returns `true` while the primary button is held.
    pub fn is_held(&self) -> bool {
        self.held
    }
}
