//! LoopDeck Core
//!
//! Platform-agnostic types, collaborator traits, and error handling shared by
//! the deck builder, the playback clock, and the sync engine.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Slide`, `Settings`, `DeckRecord`, `RemoteChange`
//! - **Collaborator Traits**: `PersistenceStore`, `ConflictResolver`, `Scheduler`
//! - **Deterministic Time**: `ManualScheduler`, a fake clock for tests and replays
//! - **Error Handling**: Unified `LoopdeckError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use loopdeck_core::types::{Settings, Slide, SlideType};
//!
//! let slide = Slide::new(SlideType::Hero).with_duration(8.0).featured();
//! assert!(slide.featured);
//!
//! let settings: Settings = serde_json::from_str(r#"{"featuredRepeats": 9}"#).unwrap();
//! assert_eq!(settings.featured_repeats, 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod scheduler;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{LoopdeckError, Result};
pub use scheduler::{ManualScheduler, TimerHandle};
pub use traits::{ChangeStream, ConflictResolver, PersistenceStore, Scheduler};

pub use types::{
    AspectRatio, BuildScope, BuildStyle, DeckDraft, DeckRecord, FireworksIntensity, ProjectKey,
    RemoteChange, SavedVersion, Settings, SettingsPatch, Slide, SlideTransition, SlideType,
    TransitionMode,
};
