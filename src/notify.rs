//! Notification sinks and deferred delivery.
//!
//! Engines report changes to an owner-supplied [`Sink`]. Plain closures are
//! sinks, and [`ChannelSink`] forwards into an `mpsc` channel for owners that
//! prefer to drain messages from their own loop.

use std::collections::VecDeque;
use std::sync::mpsc::Sender;

/// Receiver of engine notifications.
pub trait Sink<E> {
    fn deliver(&mut self, event: E);
}

impl<E, F> Sink<E> for F
where
    F: FnMut(E),
{
    fn deliver(&mut self, event: E) {
        self(event);
    }
}

/// Sink that sends every notification into a channel.
///
/// A disconnected receiver is ignored; the owner has gone away.
#[derive(Clone, Debug)]
pub struct ChannelSink<E>(pub Sender<E>);

impl<E> Sink<E> for ChannelSink<E> {
    fn deliver(&mut self, event: E) {
        let _ = self.0.send(event);
    }
}

/// Boxed sink stored by the engines.
pub type BoxedSink<E> = Box<dyn Sink<E>>;

/// Queue of notifications held back until the next event-loop turn.
#[derive(Clone, Debug)]
pub struct Outbox<E> {
    pending: VecDeque<E>,
}

impl<E> Default for Outbox<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Outbox<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: E) {
        self.pending.push_back(event);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything queued.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Take everything queued, oldest first, leaving the outbox empty.
    pub fn take(&mut self) -> VecDeque<E> {
        std::mem::take(&mut self.pending)
    }
}
