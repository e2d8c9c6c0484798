//! Wait-group counting events that are queued but not yet attempted.

use parking_lot::{Condvar, Mutex};

/// Counter of in-flight log events.
///
/// Producers call [`add`](Self::add) before enqueueing; the sender calls
/// [`done`](Self::done) once the POST attempt has finished, whatever its
/// outcome. [`wait`](Self::wait) blocks until the count reaches zero.
#[derive(Debug, Default)]
pub struct PendingCounter {
    count: Mutex<usize>,
    drained: Condvar,
}

impl PendingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self) {
        *self.count.lock() += 1;
    }

    pub fn done(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.drained.notify_all();
        }
    }

    /// Current number of pending events.
    pub fn count(&self) -> usize {
        *self.count.lock()
    }

    /// Block the calling thread until nothing is pending.
    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.drained.wait(&mut count);
        }
    }
}
