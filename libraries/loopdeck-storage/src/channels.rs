//! Per-key broadcast channels for change notifications

use loopdeck_core::types::{ProjectKey, RemoteChange};
use loopdeck_core::ChangeStream;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tracing::debug;

// Slow subscribers lag (and skip) rather than block writers
const CHANNEL_CAPACITY: usize = 32;

/// Cheap-clone registry of change channels, one per project key
#[derive(Debug, Clone, Default)]
pub(crate) struct ChangeChannels {
    senders: Arc<Mutex<HashMap<ProjectKey, broadcast::Sender<RemoteChange>>>>,
}

impl ChangeChannels {
    pub(crate) fn subscribe(&self, key: &ProjectKey) -> ChangeStream {
        let mut senders = self.senders.lock().unwrap_or_else(PoisonError::into_inner);
        senders
            .entry(key.clone())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    pub(crate) fn publish(&self, key: &ProjectKey, change: RemoteChange) {
        let senders = self.senders.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = senders.get(key) else {
            return;
        };
        let version = change.version;
        // Err only means nobody is listening right now
        if let Ok(receivers) = sender.send(change) {
            debug!(key = %key, version, receivers, "Published deck change");
        }
    }
}
