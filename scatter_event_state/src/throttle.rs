// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leading-edge throttle with a guaranteed trailing call.
//!
//! ## Usage
//!
//! 1) Route every candidate call through [`Throttle::call`]. The first call of
//!    a burst is returned immediately; calls within `delay` of the last fired
//!    call are held back, keeping only the latest arguments.
//! 2) Once per frame (or from a timer), call [`Throttle::poll`]. When the
//!    pending call's deadline has passed it is returned, so the last input of
//!    a burst is never lost.
//!
//! Timestamps are wall-clock milliseconds supplied by the caller. The throttle
//! never reads a clock itself.
//!
//! ## Minimal example
//!
//! ```
//! use scatter_event_state::throttle::Throttle;
//!
//! let mut throttle = Throttle::new(50);
//!
//! assert_eq!(throttle.call(0, 'a'), Some('a'));
//! assert_eq!(throttle.call(10, 'b'), None);
//! assert_eq!(throttle.call(40, 'c'), None);
//!
//! // Too early for the trailing call.
//! assert_eq!(throttle.poll(45), None);
//! // The trailing call carries the latest arguments.
//! assert_eq!(throttle.poll(50), Some('c'));
//! assert_eq!(throttle.poll(60), None);
//! ```

/// Internal state of a [`Throttle`].
#[derive(Clone, Debug, PartialEq, Eq)]
enum Phase<A> {
    /// Nothing held back.
    Idle,
    /// A call was held back and fires at `deadline` unless superseded.
    PendingTrailing { args: A, deadline: u64 },
}

/// Rate limiter firing at most once per `delay` milliseconds.
///
/// Leading edge: a call arriving at least `delay` after the previous fired
/// call fires immediately. Trailing edge: the latest held-back call fires from
/// [`Throttle::poll`] once `delay` has elapsed since the previous fired call.
#[derive(Clone, Debug)]
pub struct Throttle<A> {
    delay: u64,
    last_fired: Option<u64>,
    phase: Phase<A>,
}

impl<A> Throttle<A> {
    /// Creates an idle throttle with the given delay in milliseconds.
    #[must_use]
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            last_fired: None,
            phase: Phase::Idle,
        }
    }

    /// The configured delay in milliseconds.
    #[must_use]
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Changes the delay.
    ///
    /// A held-back call stays pending; its deadline is re-based on the new
    /// delay, counted from the last fired call.
    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
        if let (Phase::PendingTrailing { deadline, .. }, Some(last)) =
            (&mut self.phase, self.last_fired)
        {
            *deadline = last.saturating_add(delay);
        }
    }

    /// Returns `true` while a trailing call is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::PendingTrailing { .. })
    }

    /// The time at which the pending trailing call becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        match self.phase {
            Phase::PendingTrailing { deadline, .. } => Some(deadline),
            Phase::Idle => None,
        }
    }

    /// Offers a call at time `now`.
    ///
    /// Returns the arguments back if the call fires immediately, or `None` if
    /// it was held back as the pending trailing call.
    pub fn call(&mut self, now: u64, args: A) -> Option<A> {
        let ready = match self.last_fired {
            None => true,
            // A clock that went backwards restarts the window.
            Some(last) => now < last || now - last >= self.delay,
        };

        if ready {
            self.last_fired = Some(now);
            self.phase = Phase::Idle;
            Some(args)
        } else {
            let deadline = self
                .last_fired
                .map_or(now, |last| last.saturating_add(self.delay));
            self.phase = Phase::PendingTrailing { args, deadline };
            None
        }
    }

    /// Fires the pending trailing call if its deadline has passed.
    pub fn poll(&mut self, now: u64) -> Option<A> {
        match self.phase {
            Phase::PendingTrailing { deadline, .. } if now >= deadline => {
                self.last_fired = Some(now);
                self.take_pending()
            }
            _ => None,
        }
    }

    /// Fires the pending trailing call immediately, regardless of its deadline.
    ///
    /// Used when the stream of calls ends and the last input must be applied
    /// before the result is consumed.
    pub fn flush(&mut self) -> Option<A> {
        self.take_pending()
    }

    /// Drops any pending call and forgets the last fired time.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.last_fired = None;
    }

    fn take_pending(&mut self) -> Option<A> {
        match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::PendingTrailing { args, .. } => Some(args),
            Phase::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_fires_immediately() {
        let mut t = Throttle::new(50);
        assert_eq!(t.call(1_000, 1), Some(1));
        assert!(!t.is_pending());
    }

    #[test]
    fn burst_fires_leading_and_one_trailing() {
        let mut t = Throttle::new(50);
        let mut fired = 0;

        for now in [0_u64, 10, 20, 40] {
            if t.call(now, now).is_some() {
                fired += 1;
            }
            // Polling inside the window never fires.
            assert_eq!(t.poll(now), None);
        }
        assert_eq!(fired, 1);
        assert_eq!(t.deadline(), Some(50));

        assert_eq!(t.poll(50), Some(40));
        assert_eq!(t.poll(200), None);
    }

    #[test]
    fn call_after_window_fires_and_drops_pending() {
        let mut t = Throttle::new(50);
        t.call(0, 'a');
        assert_eq!(t.call(30, 'b'), None);
        assert_eq!(t.call(60, 'c'), Some('c'));
        assert!(!t.is_pending());
    }

    #[test]
    fn trailing_call_restarts_the_window() {
        let mut t = Throttle::new(50);
        t.call(0, 'a');
        t.call(10, 'b');
        assert_eq!(t.poll(55), Some('b'));

        // Within 50ms of the trailing fire: held back again.
        assert_eq!(t.call(80, 'c'), None);
        assert_eq!(t.deadline(), Some(105));
    }

    #[test]
    fn set_delay_keeps_pending_call_with_new_deadline() {
        let mut t = Throttle::new(50);
        t.call(100, 'a');
        t.call(110, 'b');
        assert_eq!(t.deadline(), Some(150));

        t.set_delay(20);
        assert_eq!(t.delay(), 20);
        assert_eq!(t.deadline(), Some(120));
        assert_eq!(t.poll(120), Some('b'));
    }

    #[test]
    fn flush_and_reset() {
        let mut t = Throttle::new(50);
        t.call(0, 1);
        t.call(1, 2);
        assert_eq!(t.flush(), Some(2));
        assert_eq!(t.flush(), None);

        t.call(2, 3);
        t.reset();
        assert!(!t.is_pending());
        // After a reset the next call is a leading call again.
        assert_eq!(t.call(3, 4), Some(4));
    }

    #[test]
    fn clock_going_backwards_fires() {
        let mut t = Throttle::new(50);
        t.call(1_000, 1);
        assert_eq!(t.call(10, 2), Some(2));
    }
}
