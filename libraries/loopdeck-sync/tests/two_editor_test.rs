//! Two editors sharing one store

use loopdeck_core::types::{ProjectKey, Settings, Slide, SlideType};
use loopdeck_core::{ChangeStream, ConflictResolver, ManualScheduler};
use loopdeck_storage::MemoryStore;
use loopdeck_sync::{AcceptRemote, KeepLocal, RemoteOutcome, SyncConfig, SyncEngine, SyncEvent};
use std::time::Duration;

type Editor<R> = SyncEngine<MemoryStore, R, ManualScheduler>;

fn hero(title: &str) -> Slide {
    Slide::new(SlideType::Hero).with_field("title", title)
}

fn editor<R: ConflictResolver>(store: &MemoryStore, resolver: R, name: &str) -> (Editor<R>, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let config = SyncConfig {
        updated_by: name.to_string(),
        ..SyncConfig::default()
    };
    let engine = SyncEngine::new(store.clone(), resolver, scheduler.clone(), config);
    (engine, scheduler)
}

/// Feed every queued notification to the editor, returning the outcomes
async fn deliver<R: ConflictResolver>(editor: &mut Editor<R>, changes: &mut ChangeStream) -> Vec<RemoteOutcome> {
    let mut outcomes = Vec::new();
    while let Ok(change) = changes.try_recv() {
        outcomes.push(editor.on_remote_change(change).await);
    }
    outcomes
}

async fn fire_due<R: ConflictResolver>(editor: &mut Editor<R>, scheduler: &ManualScheduler, by: Duration) {
    for handle in scheduler.advance(by) {
        editor.on_timer(handle).await;
    }
}

#[tokio::test]
async fn confirmed_newer_version_stops_stale_overwrite() {
    let store = MemoryStore::new();
    let key = ProjectKey::default();

    let (mut first, first_clock) = editor(&store, AcceptRemote, "first");
    let (mut second, second_clock) = editor(&store, AcceptRemote, "second");
    let mut first_changes = first.subscribe().unwrap();
    let mut second_changes = second.subscribe().unwrap();

    first.load().await; // writes v1
    second.load().await;
    assert_eq!(second.state().remote_version, Some(1));

    first.set_slides(vec![hero("draft")]);
    first.force_save().await.unwrap(); // v2
    first.set_slides(vec![hero("agreed")]);
    first.force_save().await.unwrap(); // v3
    assert_eq!(first.state().remote_version, Some(3));

    // Own notifications are stale for the writer
    assert!(deliver(&mut first, &mut first_changes)
        .await
        .iter()
        .all(|outcome| *outcome == RemoteOutcome::Stale));
    deliver(&mut second, &mut second_changes).await;
    assert_eq!(second.state().remote_version, Some(3));
    assert_eq!(second.slides(), &[hero("agreed")]);

    // First keeps editing on top of v3 while second publishes v4
    first.set_slides(vec![hero("stale edit")]);
    second.set_slides(vec![hero("winner")]);
    fire_due(&mut second, &second_clock, Duration::from_secs(2)).await;
    assert_eq!(store.record(&key).unwrap().version, 4);

    let outcomes = deliver(&mut first, &mut first_changes).await;
    assert_eq!(outcomes, vec![RemoteOutcome::Applied]);
    assert_eq!(first.state().remote_version, Some(4));
    assert_eq!(first.slides(), &[hero("winner")]);
    assert!(first
        .drain_events()
        .contains(&SyncEvent::RemoteApplied { version: 4 }));

    // The stale edit's autosave was dropped
    fire_due(&mut first, &first_clock, Duration::from_secs(10)).await;
    let record = store.record(&key).unwrap();
    assert_eq!(record.version, 4);
    assert_eq!(record.slides, vec![hero("winner")]);
    assert_eq!(store.last_author(&key).as_deref(), Some("second"));
}

#[tokio::test]
async fn declining_editor_overwrites_on_next_save() {
    let store = MemoryStore::new();
    let key = ProjectKey::default();

    let (mut stubborn, clock) = editor(&store, KeepLocal, "stubborn");
    let (mut other, _other_clock) = editor(&store, AcceptRemote, "other");
    let mut changes = stubborn.subscribe().unwrap();

    stubborn.load().await;
    other.load().await;
    deliver(&mut stubborn, &mut changes).await;

    stubborn.set_slides(vec![hero("mine")]);
    other.set_slides(vec![hero("theirs")]);
    other.force_save().await.unwrap();

    assert_eq!(
        deliver(&mut stubborn, &mut changes).await,
        vec![RemoteOutcome::Declined]
    );
    fire_due(&mut stubborn, &clock, Duration::from_secs(2)).await;

    let record = store.record(&key).unwrap();
    assert_eq!(record.slides, vec![hero("mine")]);
    assert_eq!(record.version, 3);
}

#[tokio::test]
async fn player_follows_editor_settings() {
    let store = MemoryStore::new();
    let (mut editor_engine, _editor_clock) = editor(&store, AcceptRemote, "editor");
    let (mut player, _player_clock) = editor(&store, AcceptRemote, "player");
    let mut changes = player.subscribe().unwrap();

    editor_engine.load().await;
    player.load().await;
    deliver(&mut player, &mut changes).await;

    let mut settings = Settings::default();
    settings.featured_repeats = 0;
    editor_engine.set_settings(settings.clone());
    editor_engine.force_save().await.unwrap();

    deliver(&mut player, &mut changes).await;
    assert_eq!(player.settings(), &settings);
    assert!(!player.has_pending_save());
}
