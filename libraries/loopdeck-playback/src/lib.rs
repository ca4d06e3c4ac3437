//! LoopDeck - Slide Playback
//!
//! Platform-agnostic slide playback for booth displays.
//!
//! This crate provides:
//! - Deck building (featured slides repeated and evenly distributed)
//! - A timer-driven playback clock that loops forever
//! - Video-driven advancement (renderer reports the end of a video)
//! - Manual navigation (step, multi-digit jump to slide)
//! - Playback events for renderer/UI synchronization
//!
//! # Architecture
//!
//! `loopdeck-playback` owns no timers and no I/O:
//! - Timers come from an injected [`Scheduler`](loopdeck_core::Scheduler)
//! - Fired timers are reported back through [`PlaybackClock::on_timer`]
//! - Rendering is left to the host, which reads [`PlaybackClock::frame`]
//!
//! # Example: Build and Play
//!
//! ```rust
//! use loopdeck_core::{types::{Slide, SlideType}, ManualScheduler};
//! use loopdeck_playback::{build_deck, ClockConfig, ClockState, PlaybackClock};
//! use std::time::Duration;
//!
//! let slides = vec![
//!     Slide::new(SlideType::Hero).with_duration(5.0),
//!     Slide::new(SlideType::Impact).with_duration(8.0).featured(),
//!     Slide::new(SlideType::Testimonial).with_duration(5.0),
//! ];
//!
//! let scheduler = ManualScheduler::new();
//! let mut clock = PlaybackClock::new(scheduler.clone(), ClockConfig::default());
//! clock.start(build_deck(&slides, 1));
//! assert_eq!(clock.state(), ClockState::Playing);
//!
//! // 5s dwell + 50ms safety delay
//! for handle in scheduler.advance(Duration::from_millis(5050)) {
//!     clock.on_timer(handle);
//! }
//! assert_eq!(clock.index(), 1);
//! ```

mod clock;
pub mod deck;
mod error;
pub mod events;
mod jump;
pub mod types;

// Public exports
pub use clock::PlaybackClock;
pub use deck::{build_deck, build_deck_with};
pub use error::{PlaybackError, Result};
pub use events::{AdvanceCause, PlaybackEvent};
pub use jump::JumpBuffer;
pub use types::{
    ClockConfig, ClockState, DeckPosition, Direction, InstanceId, PlaybackDeck, RenderFrame,
    SlideInstance,
};
