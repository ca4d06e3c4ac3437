//! Player session against an in-memory store with paused tokio time

use loopdeck_core::types::{DeckDraft, ProjectKey, Settings, Slide, SlideType};
use loopdeck_core::PersistenceStore;
use loopdeck_playback::{ClockConfig, ClockState, InstanceId};
use loopdeck_player::PlayerSession;
use loopdeck_storage::MemoryStore;
use loopdeck_sync::{LoadOutcome, SyncConfig, SyncStatus};
use std::time::Duration;

fn timed(title: &str, seconds: f64) -> Slide {
    Slide::new(SlideType::Hero)
        .with_duration(seconds)
        .with_field("title", title)
}

async fn seeded(slides: &[Slide]) -> MemoryStore {
    let store = MemoryStore::new();
    store
        .save(&ProjectKey::default(), &DeckDraft::new(slides, &Settings::default()))
        .await
        .unwrap();
    store
}

fn session(store: &MemoryStore) -> PlayerSession<MemoryStore> {
    PlayerSession::new(store.clone(), SyncConfig::default(), ClockConfig::default())
}

#[tokio::test(start_paused = true)]
async fn start_plays_stored_deck() {
    let store = seeded(&[timed("A", 5.0), timed("B", 5.0).featured()]).await;
    let mut session = session(&store);

    assert_eq!(session.start().await, LoadOutcome::Replaced);
    assert_eq!(session.clock().state(), ClockState::Playing);
    // featuredRepeats defaults to 2: one non-featured + three featured instances
    assert_eq!(session.clock().deck().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn empty_store_plays_nothing() {
    let store = MemoryStore::new();
    let mut session = session(&store);

    assert_eq!(session.start().await, LoadOutcome::Initialized);
    assert_eq!(session.clock().state(), ClockState::Idle);
    assert!(!session.clock().has_pending_timer());
}

#[tokio::test(start_paused = true)]
async fn run_advances_on_real_timers() {
    let store = seeded(&[timed("A", 5.0), timed("B", 5.0), timed("C", 5.0)]).await;
    let mut session = session(&store);

    session
        .run(tokio::time::sleep(Duration::from_millis(5060)))
        .await
        .unwrap();

    assert_eq!(session.clock().index(), 1);
    // stopped on shutdown
    assert_eq!(session.clock().state(), ClockState::Idle);
    assert!(!session.clock().has_pending_timer());
}

#[tokio::test(start_paused = true)]
async fn run_follows_remote_changes() {
    let store = seeded(&[timed("A", 30.0), timed("B", 30.0)]).await;
    let mut session = session(&store);

    let editor = store.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        let slides = [timed("X", 4.0), timed("Y", 4.0), timed("Z", 4.0)];
        editor
            .save(&ProjectKey::default(), &DeckDraft::new(&slides, &Settings::default()))
            .await
            .unwrap();
    });

    session
        .run(tokio::time::sleep(Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(session.sync().state().remote_version, Some(2));
    assert_eq!(session.sync().slides().len(), 3);
    assert_eq!(session.clock().deck().len(), 3);
    // Rebuilt at 3s keeping index 0, then advanced at 7.05s
    assert_eq!(session.clock().index(), 1);
    assert_eq!(
        session.clock().current().map(|instance| instance.id),
        Some(InstanceId::Slide { index: 1 })
    );
    // A player never writes back what it received
    assert_eq!(store.save_count(), 2);
    assert_eq!(session.sync().status(), SyncStatus::Idle);
}
