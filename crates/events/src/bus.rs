//! Event publishing/subscription abstraction (mechanics only).
//!
//! A minimal pub/sub contract: the bus distributes messages to subscribers,
//! nothing more. It makes no persistence or ordering promises beyond the
//! implementation's own; consumers coalesce duplicates themselves (the theme
//! resolver's memoization makes duplicate tenant-change notifications a
//! no-op).

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a message stream.
///
/// Each subscription gets a copy of every message published to the bus
/// (broadcast semantics). Subscriptions are designed for single-consumer use:
/// the composition root owns one and drains it between UI turns.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Message-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (bus-specific); failures are surfaced to the caller,
/// which for session events means logging and moving on — a missed
/// notification is recovered by the next trigger plus resolver memoization.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
