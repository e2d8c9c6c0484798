//! Bounded event queue between log call sites and the sender loop.
//!
//! Producers block when the queue is full. Every enqueue is counted in the
//! shared [`PendingCounter`] before the event enters the channel, so a drain
//! wait can never observe zero while an event is still on its way in.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::event::LogEvent;
use crate::pending::PendingCounter;

/// Errors that can occur when enqueueing an event.
#[derive(Debug, PartialEq, Eq)]
pub enum QueueError {
    /// The sender loop is gone and no longer accepts events
    Closed,
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::Closed => write!(f, "Event queue has been closed"),
        }
    }
}

impl std::error::Error for QueueError {}

/// Create a bounded queue of `capacity` events sharing `pending`.
///
/// A capacity of zero is raised to one so the queue always buffers.
pub fn bounded(capacity: usize, pending: Arc<PendingCounter>) -> (EventSender, EventReceiver) {
    let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));

    let sender = EventSender {
        tx,
        pending: pending.clone(),
    };
    let receiver = EventReceiver { rx, pending };

    (sender, receiver)
}

/// Producer handle. Cheap to clone and shareable across threads.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: Sender<LogEvent>,
    pending: Arc<PendingCounter>,
}

impl EventSender {
    /// Count the event as pending, then enqueue it, blocking while full.
    pub fn send(&self, event: LogEvent) -> Result<(), QueueError> {
        self.pending.add();

        if self.tx.send(event).is_err() {
            self.pending.done();
            return Err(QueueError::Closed);
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.tx.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.tx.capacity().unwrap_or(0)
    }
}

/// Consumer handle, owned by the sender loop.
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<LogEvent>,
    pending: Arc<PendingCounter>,
}

impl EventReceiver {
    /// Block until the next event arrives.
    ///
    /// Returns `None` once every [`EventSender`] has been dropped.
    pub fn recv(&self) -> Option<LogEvent> {
        self.rx.recv().ok()
    }

    /// Mark one received event as attempted.
    pub fn complete(&self) {
        self.pending.done();
    }
}
