//! Headless player session
//!
//! Wires the sync engine to the playback clock: the deck is rebuilt from the
//! engine's slides and settings after the initial load and after every applied
//! remote change. A player holds no edits, so remote changes are always
//! accepted.

use crate::error::Result;
use crate::scheduler::{FiredTimers, TokioScheduler};
use loopdeck_core::types::RemoteChange;
use loopdeck_core::{PersistenceStore, TimerHandle};
use loopdeck_playback::{build_deck_with, ClockConfig, PlaybackClock, PlaybackEvent};
use loopdeck_sync::{AcceptRemote, LoadOutcome, RemoteOutcome, SyncConfig, SyncEngine, SyncEvent};
use std::future::Future;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

pub type PlayerSync<P> = SyncEngine<P, AcceptRemote, TokioScheduler>;

/// Player state: one clock, one sync engine, one timer channel each
pub struct PlayerSession<P: PersistenceStore> {
    clock: PlaybackClock<TokioScheduler>,
    sync: PlayerSync<P>,
    clock_timers: FiredTimers,
    sync_timers: FiredTimers,
}

impl<P: PersistenceStore> PlayerSession<P> {
    /// Must be called from inside a tokio runtime
    pub fn new(store: P, sync_config: SyncConfig, clock_config: ClockConfig) -> Self {
        let (clock_scheduler, clock_timers) = TokioScheduler::new();
        let (sync_scheduler, sync_timers) = TokioScheduler::new();

        Self {
            clock: PlaybackClock::new(clock_scheduler, clock_config),
            sync: SyncEngine::new(store, AcceptRemote, sync_scheduler, sync_config),
            clock_timers,
            sync_timers,
        }
    }

    /// Load the stored deck and start playing it
    pub async fn start(&mut self) -> LoadOutcome {
        let outcome = self.sync.load().await;
        let deck = build_deck_with(self.sync.slides(), self.sync.settings());
        info!(
            ?outcome,
            slides = self.sync.slides().len(),
            deck = deck.len(),
            "Starting playback"
        );
        self.clock.start(deck);
        self.report();
        outcome
    }

    /// Play until `shutdown` resolves
    ///
    /// Subscribes before loading so no change between the two is missed.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut changes = self.sync.subscribe()?;
        self.start().await;

        tokio::pin!(shutdown);
        let mut following = true;

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutting down player");
                    self.clock.stop();
                    break;
                }
                Some(handle) = self.clock_timers.recv() => {
                    self.on_clock_timer(handle);
                }
                Some(handle) = self.sync_timers.recv() => {
                    self.sync.on_timer(handle).await;
                    self.report();
                }
                change = changes.recv(), if following => match change {
                    Ok(change) => {
                        self.on_remote_change(change).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Missed deck changes, reloading");
                        self.sync.load().await;
                        self.rebuild();
                    }
                    Err(RecvError::Closed) => {
                        warn!("Change stream closed, playing the current deck");
                        following = false;
                    }
                },
            }
        }

        self.report();
        Ok(())
    }

    /// Apply a remote change and rebuild the deck if it was taken
    pub async fn on_remote_change(&mut self, change: RemoteChange) -> RemoteOutcome {
        let outcome = self.sync.on_remote_change(change).await;
        if outcome == RemoteOutcome::Applied {
            self.rebuild();
        }
        outcome
    }

    /// Renderer signal: the current video finished
    pub fn on_external_end(&mut self) -> bool {
        let advanced = self.clock.on_external_end();
        self.report();
        advanced
    }

    pub fn clock(&self) -> &PlaybackClock<TokioScheduler> {
        &self.clock
    }

    pub fn sync(&self) -> &PlayerSync<P> {
        &self.sync
    }

    fn on_clock_timer(&mut self, handle: TimerHandle) {
        if self.clock.on_timer(handle) {
            self.report();
        }
    }

    fn rebuild(&mut self) {
        let deck = build_deck_with(self.sync.slides(), self.sync.settings());
        debug!(deck = deck.len(), "Rebuilding deck");
        self.clock.rebuild_deck(deck);
        self.report();
    }

    /// Log queued events from both components
    fn report(&mut self) {
        for event in self.sync.drain_events() {
            match event {
                SyncEvent::RemoteApplied { version } => info!(version, "Deck updated remotely"),
                SyncEvent::LocalReplaced { version } => info!(version, "Loaded stored deck"),
                other => debug!(?other, "Sync event"),
            }
        }

        for event in self.clock.drain_events() {
            match event {
                PlaybackEvent::SlideChanged {
                    index,
                    slide_id,
                    cause,
                    ..
                } => {
                    let Some(instance) = self.clock.deck().get(index) else {
                        continue;
                    };
                    info!(
                        number = index + 1,
                        count = self.clock.deck().len(),
                        slide = %slide_id,
                        kind = %instance.slide.kind,
                        transition = ?instance.slide.transition,
                        ?cause,
                        "Showing slide"
                    );
                }
                PlaybackEvent::StateChanged { state } => debug!(?state, "Playback state"),
                other => debug!(?other, "Playback event"),
            }
        }
    }
}
