//! LoopDeck - Deck Sync
//!
//! Keeps an editor's (or player's) in-memory deck consistent with the shared
//! persistence store.
//!
//! This crate provides:
//! - Initial load with remote-wins reconciliation
//! - Trailing-debounce autosave with a visible save status
//! - Forced saves as a manual escape hatch
//! - Version-checked handling of change notifications from other sessions
//!
//! Conflicts are never merged: a newer remote version either replaces local
//! state (once the [`ConflictResolver`](loopdeck_core::ConflictResolver)
//! accepts it) or is overwritten by the next local save.

mod engine;
mod error;
mod resolver;
mod types;

// Public exports
pub use engine::SyncEngine;
pub use error::{Result, SyncError};
pub use resolver::{AcceptRemote, KeepLocal};
pub use types::{LoadOutcome, RemoteOutcome, SyncConfig, SyncEvent, SyncState, SyncStatus};
