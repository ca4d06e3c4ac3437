//! Timer handles and a deterministic scheduler
//!
//! `ManualScheduler` keeps virtual time that only moves when the caller
//! advances it, so timer-driven state machines can be tested without sleeping.

use crate::traits::Scheduler;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Identifies one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Create a handle from a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    /// (deadline, handle), unordered
    pending: Vec<(Duration, TimerHandle)>,
    armed_total: usize,
}

/// Virtual-time scheduler
///
/// Clones share the same clock and timer table: hand one clone to the
/// component under test and keep another to drive time.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<Inner>>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers armed and not yet fired or cancelled
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Total number of timers ever armed
    pub fn armed_total(&self) -> usize {
        self.inner.borrow().armed_total
    }

    /// Whether `handle` is still pending
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.inner
            .borrow()
            .pending
            .iter()
            .any(|(_, pending)| *pending == handle)
    }

    /// Absolute deadline of a pending timer
    pub fn deadline(&self, handle: TimerHandle) -> Option<Duration> {
        self.inner
            .borrow()
            .pending
            .iter()
            .find(|(_, pending)| *pending == handle)
            .map(|(deadline, _)| *deadline)
    }

    /// Move time forward and return the timers that came due, in firing order
    ///
    /// Timers armed by the caller while handling the returned handles are not
    /// included, even if they fall inside the window.
    pub fn advance(&self, by: Duration) -> Vec<TimerHandle> {
        let mut inner = self.inner.borrow_mut();
        inner.now += by;
        let now = inner.now;

        let mut due: Vec<(Duration, TimerHandle)> = inner
            .pending
            .iter()
            .copied()
            .filter(|(deadline, _)| *deadline <= now)
            .collect();
        inner.pending.retain(|(deadline, _)| *deadline > now);
        due.sort();

        due.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Jump to the earliest pending deadline and fire that timer
    pub fn advance_to_next(&self) -> Option<TimerHandle> {
        let mut inner = self.inner.borrow_mut();
        let (index, &(deadline, handle)) = inner
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| **entry)?;
        inner.pending.swap_remove(index);
        inner.now = inner.now.max(deadline);
        Some(handle)
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        inner.armed_total += 1;
        let handle = TimerHandle(inner.next_id);
        let deadline = inner.now + delay;
        inner.pending.push((deadline, handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.inner
            .borrow_mut()
            .pending
            .retain(|(_, pending)| *pending != handle);
    }
}
