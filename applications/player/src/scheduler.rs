//! Tokio-backed timer scheduler
//!
//! Each armed timer is a spawned sleep that reports its handle over an
//! unbounded channel when it fires. Cancelling aborts the task. A timer that
//! fired just before it was cancelled may still be delivered; the clock and
//! the sync engine ignore handles they no longer hold.

use loopdeck_core::{Scheduler, TimerHandle};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Receives the handles of fired timers
pub type FiredTimers = mpsc::UnboundedReceiver<TimerHandle>;

/// Scheduler that must be used from inside a tokio runtime
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    fired: mpsc::UnboundedSender<TimerHandle>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its timers report to
    pub fn new() -> (Self, FiredTimers) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            tasks: HashMap::new(),
            fired,
        };
        (scheduler, receiver)
    }

    /// Timers armed and not yet fired or cancelled
    pub fn pending_count(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let fired = self.fired.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session is shutting down
            let _ = fired.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
