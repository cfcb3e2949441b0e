//! Host-registered listeners for engine notifications.
//!
//! A [`Reaction`] pairs a predicate with a handler. The [`ReactionRegistry`]
//! keeps them in registration order and hands every dispatched event to
//! each reaction whose predicate holds. There is no first-match short
//! circuit: a catch-all logger and a type-specific view updater both run
//! for the same event.

use crate::events::{EventKind, GameResult, IOEvent};
use crate::types::Square;

type Predicate = Box<dyn Fn(&IOEvent) -> bool + Send>;
type Handler = Box<dyn FnMut(&IOEvent) + Send>;

pub struct Reaction {
    predicate: Predicate,
    handler: Handler,
}

impl Reaction {
    pub fn new<P, H>(predicate: P, handler: H) -> Self
    where
        P: Fn(&IOEvent) -> bool + Send + 'static,
        H: FnMut(&IOEvent) + Send + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            handler: Box::new(handler),
        }
    }

    /// React to every event of one kind.
    pub fn on<H>(kind: EventKind, handler: H) -> Self
    where
        H: FnMut(&IOEvent) + Send + 'static,
    {
        Self::new(move |event| event.kind() == kind, handler)
    }

    /// React to every event except [`IOEvent::NoEvent`].
    pub fn all<H>(handler: H) -> Self
    where
        H: FnMut(&IOEvent) + Send + 'static,
    {
        Self::new(|event| !event.is_no_event(), handler)
    }

    pub fn on_check<H>(mut handler: H) -> Self
    where
        H: FnMut(Square) + Send + 'static,
    {
        Self::on(EventKind::ShowCheck, move |event| {
            if let IOEvent::ShowCheck { square } = event {
                handler(*square);
            }
        })
    }

    pub fn on_promotion<H>(mut handler: H) -> Self
    where
        H: FnMut(Square) + Send + 'static,
    {
        Self::on(EventKind::ShowPromotion, move |event| {
            if let IOEvent::ShowPromotion { square } = event {
                handler(*square);
            }
        })
    }

    pub fn on_ended<H>(mut handler: H) -> Self
    where
        H: FnMut(&GameResult) + Send + 'static,
    {
        Self::on(EventKind::ShowEnded, move |event| {
            if let IOEvent::ShowEnded { result } = event {
                handler(result);
            }
        })
    }

    pub fn matches(&self, event: &IOEvent) -> bool {
        (self.predicate)(event)
    }

    /// Run the handler if the predicate holds. Returns whether it ran.
    pub fn react(&mut self, event: &IOEvent) -> bool {
        if self.matches(event) {
            (self.handler)(event);
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reaction").finish_non_exhaustive()
    }
}

/// Ordered reactions. Insertion order is dispatch order; duplicates are kept.
#[derive(Debug, Default)]
pub struct ReactionRegistry {
    reactions: Vec<Reaction>,
}

impl ReactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    /// Deliver one event to every matching reaction.
    /// Returns the number of handlers invoked.
    pub fn dispatch(&mut self, event: &IOEvent) -> usize {
        let mut invoked = 0;
        for reaction in &mut self.reactions {
            if reaction.react(event) {
                invoked += 1;
            }
        }
        tracing::trace!(kind = ?event.kind(), invoked, "Dispatched event");
        invoked
    }

    /// Deliver events one at a time, preserving their order.
    pub fn dispatch_all<'a>(&mut self, events: impl IntoIterator<Item = &'a IOEvent>) -> usize {
        events.into_iter().map(|event| self.dispatch(event)).sum()
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}
