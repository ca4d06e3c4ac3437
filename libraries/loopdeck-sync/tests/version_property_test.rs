//! Property-based tests for remote version handling

use chrono::Utc;
use loopdeck_core::types::{RemoteChange, Slide, SlideType};
use loopdeck_core::ManualScheduler;
use loopdeck_storage::MemoryStore;
use loopdeck_sync::{AcceptRemote, RemoteOutcome, SyncConfig, SyncEngine};
use proptest::prelude::*;

fn change(version: u64) -> RemoteChange {
    RemoteChange {
        slides: Some(vec![Slide::new(SlideType::Hero).with_field("v", version)]),
        settings: None,
        version,
        updated_at: Utc::now(),
    }
}

proptest! {
    /// Property: the adopted version never moves backwards, and only strictly
    /// newer notifications are applied
    #[test]
    fn remote_version_is_monotonic(versions in prop::collection::vec(0u64..50, 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let mut engine = SyncEngine::new(
                MemoryStore::new(),
                AcceptRemote,
                ManualScheduler::new(),
                SyncConfig::default(),
            );
            engine.load().await;

            for version in versions {
                let before = engine.state().remote_version;
                let outcome = engine.on_remote_change(change(version)).await;
                let after = engine.state().remote_version;

                let newer = !before.is_some_and(|known| version <= known);
                prop_assert_eq!(outcome == RemoteOutcome::Applied, newer);
                prop_assert!(after >= before);
                if !newer {
                    prop_assert_eq!(after, before);
                }
            }
            Ok(())
        })?;
    }
}
