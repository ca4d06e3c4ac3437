
use loopdeck_core::types::{ProjectKey, Settings};
use loopdeck_core::PersistenceStore;
use loopdeck_storage::decks;
use test_helpers::{hero, sample_draft, TestDb};

#[tokio::test]
async fn test_load_missing_record() {
    let db = TestDb::new().await;
    let store = db.store();

    let record = store.load(&ProjectKey::default()).await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn test_save_then_load_round_trips_content() {
    let db = TestDb::new().await;
    let store = db.store();
    let key = ProjectKey::default();
    let draft = sample_draft();

    let saved = store.save(&key, &draft).await.unwrap();
    assert_eq!(saved.version, 1);

    let record = store.load(&key).await.unwrap().unwrap();
    assert_eq!(record.slides, draft.slides);
    assert_eq!(record.settings.featured_repeats, 3);
    assert_eq!(record.version, 1);
    assert_eq!(record.updated_at, saved.updated_at);
}

#[tokio::test]
async fn test_every_write_bumps_version() {
    let db = TestDb::new().await;
    let store = db.store();
    let key = ProjectKey::default();

    for expected in 1..=4 {
        let saved = store.save(&key, &sample_draft()).await.unwrap();
        assert_eq!(saved.version, expected);
    }
    assert_eq!(store.load(&key).await.unwrap().unwrap().version, 4);
}

#[tokio::test]
async fn test_row_without_settings_loads_defaults() {
    let db = TestDb::new().await;

    sqlx::query(
        "INSERT INTO deck_records (project_key, slides_json, version, updated_at)
         VALUES ('legacy', '[{\"type\":\"hero\",\"title\":\"Old\"}]', 7, 1767225600000)",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let record = db
        .store()
        .load(&ProjectKey::new("legacy"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.version, 7);
    assert_eq!(record.settings, Settings::default());
    assert_eq!(record.slides, vec![hero("Old")]);
}

#[tokio::test]
async fn test_author_is_recorded() {
    let db = TestDb::new().await;
    let key = ProjectKey::default();

    db.store()
        .save(&key, &sample_draft().with_author("booth-3"))
        .await
        .unwrap();

    let author = decks::updated_by(db.pool(), &key).await.unwrap();
    assert_eq!(author.as_deref(), Some("booth-3"));
}

#[tokio::test]
async fn test_list_keys() {
    let db = TestDb::new().await;
    let store = db.store();

    store.save(&ProjectKey::new("lobby"), &sample_draft()).await.unwrap();
    store.save(&ProjectKey::new("booth"), &sample_draft()).await.unwrap();

    let keys = decks::list_keys(db.pool()).await.unwrap();
    assert_eq!(keys, vec![ProjectKey::new("booth"), ProjectKey::new("lobby")]);
}

#[tokio::test]
async fn test_writes_reach_subscribers_of_clones() {
    let db = TestDb::new().await;
    let store = db.store();
    let key = ProjectKey::default();
    let mut changes = store.clone().subscribe(&key).unwrap();

    store.save(&key, &sample_draft()).await.unwrap();
    store.save(&key, &sample_draft()).await.unwrap();

    assert_eq!(changes.recv().await.unwrap().version, 1);
    let second = changes.recv().await.unwrap();
    assert_eq!(second.version, 2);
    assert_eq!(second.slides.unwrap().len(), 3);
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = TestDb::new().await;
    loopdeck_storage::run_migrations(db.pool()).await.unwrap();
}
