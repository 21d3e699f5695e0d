// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notification bus for engine events.
//!
//! Handlers are plain closures keyed by [`Topic`]. They run synchronously
//! inside the engine call that published the event, in subscription order.
//! A handler receives the event by reference and cannot call back into the
//! engine; queue work for after the call returns instead.

use std::fmt;

use hashbrown::HashMap;
use kurbo::Affine;

/// Category of an [`Event`], used for subscribing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The selection was replaced.
    Select,
    /// A non-empty selection was cleared.
    Deselect,
    /// The pointer moved onto a point.
    PointOver,
    /// The pointer left the hovered point.
    PointOut,
    /// The camera view changed.
    View,
}

/// An engine notification.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The selection was replaced with `points`.
    Select {
        /// The new selection, in commit order.
        points: Vec<u32>,
    },
    /// A non-empty selection was cleared.
    Deselect,
    /// The pointer moved onto this point.
    PointOver(u32),
    /// The pointer left this point.
    PointOut(u32),
    /// The camera view is now this matrix.
    View(Affine),
}

impl Event {
    /// The topic this event is published under.
    #[must_use]
    pub fn topic(&self) -> Topic {
        match self {
            Self::Select { .. } => Topic::Select,
            Self::Deselect => Topic::Deselect,
            Self::PointOver(_) => Topic::PointOver,
            Self::PointOut(_) => Topic::PointOut,
            Self::View(_) => Topic::View,
        }
    }
}

/// Handle returned by [`PubSub::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&Event)>;

/// Topic-keyed publish/subscribe registry.
#[derive(Default)]
pub struct PubSub {
    next_id: u64,
    handlers: HashMap<Topic, Vec<(SubscriptionId, Handler)>>,
}

impl fmt::Debug for PubSub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(Topic, usize)> = self
            .handlers
            .iter()
            .map(|(topic, handlers)| (*topic, handlers.len()))
            .collect();
        f.debug_struct("PubSub")
            .field("next_id", &self.next_id)
            .field("handlers", &counts)
            .finish()
    }
}

impl PubSub {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of `topic`.
    pub fn subscribe<F>(&mut self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(topic)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a subscription. Returns `true` if it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            let before = handlers.len();
            handlers.retain(|(sid, _)| *sid != id);
            if handlers.len() != before {
                return true;
            }
        }
        false
    }

    /// Delivers `event` to every handler of its topic.
    pub fn publish(&mut self, event: &Event) {
        if let Some(handlers) = self.handlers.get_mut(&event.topic()) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    /// Number of handlers subscribed to `topic`.
    #[must_use]
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.handlers.get(&topic).map_or(0, Vec::len)
    }

    /// Removes every subscription.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
