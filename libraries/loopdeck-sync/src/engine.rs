//! Sync engine - debounced autosave and remote change reconciliation
//!
//! Owns the authoritative in-memory `(slides, settings)` pair and keeps it in
//! step with a [`PersistenceStore`] under optimistic concurrency:
//!
//! - Local edits after the initial load arm a trailing debounce timer; the
//!   save fires once the editor has been quiet for `autosave_delay`.
//! - The store assigns versions. Remote notifications are applied only when
//!   strictly newer than the last adopted version, and only once the
//!   [`ConflictResolver`] accepts them.
//!
//! Timers come from an injected [`Scheduler`]; the host feeds fired handles
//! back through [`SyncEngine::on_timer`].

use crate::{
    error::{Result, SyncError},
    types::{LoadOutcome, RemoteOutcome, SyncConfig, SyncEvent, SyncState, SyncStatus},
};
use loopdeck_core::{
    types::{DeckDraft, RemoteChange, SavedVersion, Settings, Slide},
    ChangeStream, ConflictResolver, PersistenceStore, Scheduler, TimerHandle,
};
use tracing::{debug, error, info, warn};

/// Reconciles local deck edits with a persistence store
pub struct SyncEngine<P, R, S>
where
    P: PersistenceStore,
    R: ConflictResolver,
    S: Scheduler,
{
    store: P,
    resolver: R,
    scheduler: S,
    config: SyncConfig,

    slides: Vec<Slide>,
    settings: Settings,
    state: SyncState,

    // Edits before the first load are local defaults, not autosaved
    loaded: bool,

    debounce: Option<TimerHandle>,
    saved_display: Option<TimerHandle>,

    // Highest version the resolver turned down
    declined_version: Option<u64>,

    pending_events: Vec<SyncEvent>,
}

impl<P, R, S> SyncEngine<P, R, S>
where
    P: PersistenceStore,
    R: ConflictResolver,
    S: Scheduler,
{
    /// Create an engine with an empty deck and default settings
    pub fn new(store: P, resolver: R, scheduler: S, config: SyncConfig) -> Self {
        Self {
            store,
            resolver,
            scheduler,
            config,
            slides: Vec::new(),
            settings: Settings::default(),
            state: SyncState::default(),
            loaded: false,
            debounce: None,
            saved_display: None,
            declined_version: None,
            pending_events: Vec::new(),
        }
    }

    /// Seed the local fallback used until (or instead of) the stored record
    pub fn with_local(mut self, slides: Vec<Slide>, settings: Settings) -> Self {
        self.slides = slides;
        self.settings = settings;
        self
    }

    // ===== Load =====

    /// Read the stored record and reconcile it with local state
    ///
    /// The stored record wins when its content differs. With nothing stored,
    /// local state is written as the first record. A failed read keeps the
    /// local defaults and leaves the status untouched.
    pub async fn load(&mut self) -> LoadOutcome {
        self.loaded = true;
        let key = self.config.project_key.clone();

        match self.store.load(&key).await {
            Ok(Some(record)) => {
                self.state.remote_version = Some(record.version);
                self.state.last_saved = Some(record.updated_at);

                if self.draft().matches(&record) {
                    info!(key = %key, version = record.version, "Loaded deck, local state current");
                    return LoadOutcome::Unchanged;
                }

                info!(
                    key = %key,
                    version = record.version,
                    slides = record.slides.len(),
                    "Loaded deck, replacing local state"
                );
                self.slides = record.slides;
                self.settings = record.settings;
                self.emit(SyncEvent::LocalReplaced {
                    version: record.version,
                });
                LoadOutcome::Replaced
            }
            Ok(None) => {
                info!(key = %key, "No stored deck, writing initial record");
                if self.save().await.is_err() {
                    debug!("Initial write failed; the next edit will retry");
                }
                LoadOutcome::Initialized
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to load deck, keeping local defaults");
                LoadOutcome::Fallback
            }
        }
    }

    /// Subscribe to change notifications for this engine's project key
    pub fn subscribe(&self) -> Result<ChangeStream> {
        Ok(self.store.subscribe(&self.config.project_key)?)
    }

    // ===== Local Mutations =====

    /// Replace the authored slides
    pub fn set_slides(&mut self, slides: Vec<Slide>) {
        self.slides = slides;
        self.mark_dirty();
    }

    /// Replace the deck settings
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.mark_dirty();
    }

    /// Edit the authored slides in place
    pub fn update_slides<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Vec<Slide>),
    {
        edit(&mut self.slides);
        self.mark_dirty();
    }

    // ===== Timers and Saves =====

    /// Handle a fired timer
    ///
    /// Returns `true` if the handle belonged to this engine. The debounce
    /// timer triggers the autosave; the saved-display timer reverts the
    /// status to `idle`.
    pub async fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.debounce == Some(handle) {
            self.debounce = None;
            if self.save().await.is_err() {
                debug!("Autosave failed; waiting for the next edit or a forced save");
            }
            return true;
        }

        if self.saved_display == Some(handle) {
            self.saved_display = None;
            if self.state.status == SyncStatus::Saved {
                self.set_status(SyncStatus::Idle);
            }
            return true;
        }

        false
    }

    /// Cancel any pending autosave and write immediately
    pub async fn force_save(&mut self) -> Result<SavedVersion> {
        self.cancel_debounce();
        self.save().await
    }

    async fn save(&mut self) -> Result<SavedVersion> {
        let key = self.config.project_key.clone();
        let draft = self.draft();

        self.cancel_saved_display();
        self.set_status(SyncStatus::Saving);

        match self.store.save(&key, &draft).await {
            Ok(saved) => {
                info!(
                    key = %key,
                    version = saved.version,
                    slides = draft.slides.len(),
                    "Saved deck"
                );
                self.state.remote_version = Some(saved.version);
                self.state.last_saved = Some(saved.updated_at);
                self.emit(SyncEvent::Saved {
                    version: saved.version,
                    updated_at: saved.updated_at,
                });
                self.set_status(SyncStatus::Saved);
                self.saved_display = Some(self.scheduler.arm(self.config.saved_display));
                Ok(saved)
            }
            Err(source) => {
                error!(key = %key, error = %source, "Failed to save deck");
                self.set_status(SyncStatus::Error);
                Err(SyncError::SaveFailed {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }

    // ===== Remote Changes =====

    /// Handle a change notification from the store
    ///
    /// Versions at or below the last adopted one are ignored, as are versions
    /// the resolver already declined. Otherwise the resolver decides: on
    /// accept the slides are replaced, the settings fields present are merged
    /// over the current settings, and any pending autosave is dropped.
    pub async fn on_remote_change(&mut self, change: RemoteChange) -> RemoteOutcome {
        let known = self.state.remote_version;
        if known.is_some_and(|version| change.version <= version) {
            debug!(version = change.version, ?known, "Ignoring stale remote change");
            return RemoteOutcome::Stale;
        }
        if self
            .declined_version
            .is_some_and(|version| change.version <= version)
        {
            debug!(version = change.version, "Remote change already declined");
            return RemoteOutcome::Stale;
        }

        if !self.resolver.resolve(&self.draft(), &change).await {
            info!(version = change.version, "Keeping local edits over remote change");
            self.declined_version = Some(change.version);
            return RemoteOutcome::Declined;
        }

        if let Some(slides) = change.slides {
            self.slides = slides;
        }
        if let Some(patch) = &change.settings {
            self.settings.apply(patch);
        }
        self.state.remote_version = Some(change.version);
        self.state.last_saved = Some(change.updated_at);

        self.cancel_debounce();
        self.cancel_saved_display();
        self.set_status(SyncStatus::Idle);

        info!(version = change.version, "Applied remote change");
        self.emit(SyncEvent::RemoteApplied {
            version: change.version,
        });
        RemoteOutcome::Applied
    }

    // ===== State Queries =====

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn status(&self) -> SyncStatus {
        self.state.status
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Whether the initial load has run
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether an autosave is waiting for the debounce window
    pub fn has_pending_save(&self) -> bool {
        self.debounce.is_some()
    }

    /// Content a save would transmit right now
    pub fn draft(&self) -> DeckDraft {
        DeckDraft::new(&self.slides, &self.settings).with_author(&self.config.updated_by)
    }

    /// Take all queued events (oldest first)
    pub fn drain_events(&mut self) -> Vec<SyncEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    fn mark_dirty(&mut self) {
        if !self.loaded {
            debug!("Local edit before load, not scheduling autosave");
            return;
        }

        self.state.local_version += 1;
        self.cancel_saved_display();
        self.cancel_debounce();

        let handle = self.scheduler.arm(self.config.autosave_delay);
        debug!(
            handle = handle.id(),
            local_version = self.state.local_version,
            "Armed autosave timer"
        );
        self.debounce = Some(handle);
        self.set_status(SyncStatus::Pending);
    }

    fn cancel_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            debug!(handle = handle.id(), "Cancelled autosave timer");
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_saved_display(&mut self) {
        if let Some(handle) = self.saved_display.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn set_status(&mut self, status: SyncStatus) {
        if self.state.status != status {
            self.state.status = status;
            self.emit(SyncEvent::StatusChanged { status });
        }
    }

    fn emit(&mut self, event: SyncEvent) {
        self.pending_events.push(event);
    }
}
