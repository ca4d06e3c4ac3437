/// Collaborator traits consumed by the playback and sync cores
use crate::error::Result;
use crate::scheduler::TimerHandle;
use crate::types::{DeckDraft, DeckRecord, ProjectKey, RemoteChange, SavedVersion};
use async_trait::async_trait;
use std::time::Duration;

/// Stream of change notifications for one project key
pub type ChangeStream = tokio::sync::broadcast::Receiver<RemoteChange>;

/// Durable slide/settings storage with change notification
///
/// Implementers assign a monotonically increasing version on every successful
/// write; that counter is the only arbiter between concurrent editors.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Load the record for a project key
    ///
    /// Returns `Ok(None)` when no record has been written yet.
    ///
    /// # Errors
    /// Returns an error if the backend is unreachable or the record is malformed
    async fn load(&self, key: &ProjectKey) -> Result<Option<DeckRecord>>;

    /// Write a draft, returning the version the store assigned
    ///
    /// # Errors
    /// Returns an error if the write was not applied
    async fn save(&self, key: &ProjectKey, draft: &DeckDraft) -> Result<SavedVersion>;

    /// Subscribe to writes made to a project key (including our own)
    ///
    /// # Errors
    /// Returns an error if the subscription cannot be established
    fn subscribe(&self, key: &ProjectKey) -> Result<ChangeStream>;
}

/// Host decision for a newer remote version arriving while editing
///
/// Returning `true` overwrites local state with the remote payload.
#[async_trait]
pub trait ConflictResolver: Send + Sync {
    /// Decide whether `remote` should replace `local`
    async fn resolve(&self, local: &DeckDraft, remote: &RemoteChange) -> bool;
}

/// Timer capability injected into the playback clock and the sync engine
///
/// Fired timers are reported back to the owner by the host (for example
/// `PlaybackClock::on_timer`), never through a stored callback.
pub trait Scheduler {
    /// Arm a one-shot timer that fires after `delay`
    fn arm(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a timer; cancelling a fired or unknown handle is a no-op
    fn cancel(&mut self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        (**self).arm(delay)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}
