use chrono::{DateTime, Utc};
use loopdeck_core::types::ProjectKey;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Save status shown by the editor's status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Idle,
    Pending,  // Edit waiting for the debounce window
    Saving,   // Write in flight
    Saved,    // Shown briefly after a successful write
    Error,    // Sticky until the next successful write
}

/// Snapshot of the engine's bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncState {
    pub status: SyncStatus,

    /// Number of local mutations since construction
    pub local_version: u64,

    /// Store-assigned version last adopted, `None` until the first load or save
    pub remote_version: Option<u64>,

    pub last_saved: Option<DateTime<Utc>>,
}

/// Result of the initial load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored content differed and replaced local state
    Replaced,
    /// Stored content matched local state
    Unchanged,
    /// Nothing stored yet: local state was written as the first record
    Initialized,
    /// The store could not be read; local defaults stay in place
    Fallback,
}

/// How a remote change notification was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// Not newer than the known version (or already declined)
    Stale,
    /// Accepted and written over local state
    Applied,
    /// Resolver kept the local edits
    Declined,
}

/// Events emitted by the sync engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncEvent {
    /// Save status changed
    StatusChanged { status: SyncStatus },

    /// A write succeeded
    Saved {
        version: u64,
        updated_at: DateTime<Utc>,
    },

    /// A remote change overwrote local state
    RemoteApplied { version: u64 },

    /// The initial load replaced local state with the stored record
    LocalReplaced { version: u64 },
}

/// Configuration for the sync engine
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Record the engine reads and writes (default: "default")
    pub project_key: ProjectKey,

    /// Quiet period after the last edit before autosave (default: 2s)
    pub autosave_delay: Duration,

    /// How long `saved` shows before reverting to `idle` (default: 2s)
    pub saved_display: Duration,

    /// Author recorded on every write (default: "editor")
    pub updated_by: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            project_key: ProjectKey::default(),
            autosave_delay: Duration::from_secs(2),
            saved_display: Duration::from_secs(2),
            updated_by: loopdeck_core::types::DEFAULT_AUTHOR.to_string(),
        }
    }
}
