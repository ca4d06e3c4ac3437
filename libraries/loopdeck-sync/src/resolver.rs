//! Stock conflict resolvers
//!
//! Interactive hosts implement [`ConflictResolver`] themselves (a prompt, a
//! dialog). These cover the non-interactive cases.

use async_trait::async_trait;
use loopdeck_core::types::{DeckDraft, RemoteChange};
use loopdeck_core::ConflictResolver;

/// Always take the remote change
///
/// Used by players, which hold no edits of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptRemote;

#[async_trait]
impl ConflictResolver for AcceptRemote {
    async fn resolve(&self, _local: &DeckDraft, _remote: &RemoteChange) -> bool {
        true
    }
}

/// Never take the remote change; the next autosave overwrites it
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepLocal;

#[async_trait]
impl ConflictResolver for KeepLocal {
    async fn resolve(&self, _local: &DeckDraft, _remote: &RemoteChange) -> bool {
        false
    }
}
