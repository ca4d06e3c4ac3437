//! Playback Events
//!
//! Event-based communication for renderer and UI synchronization.
//! Events are queued at key points and collected with
//! `PlaybackClock::drain_events`:
//! - State changes (idle/playing/awaiting external end)
//! - Slide changes (timer, video end, manual navigation, rebuild)
//! - Deck rebuilds
//! - Jump buffer edits

use crate::types::{ClockState, InstanceId};
use serde::{Deserialize, Serialize};

/// Why the current slide changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceCause {
    /// Playback started on a fresh deck
    Start,
    /// Dwell timer fired
    Timer,
    /// Renderer reported the end of a self-timed slide
    ExternalEnd,
    /// Manual next/previous
    Step,
    /// Committed jump to a slide number
    Jump,
    /// Deck was rebuilt and the index was clamped
    Rebuild,
}

/// Events emitted by the playback clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Clock state changed
    StateChanged {
        /// The new state
        state: ClockState,
    },

    /// A (possibly different) slide instance is now current
    SlideChanged {
        /// New zero-based index
        index: usize,
        /// Index before the change, `None` when playback just started
        previous_index: Option<usize>,
        /// Identity of the new current instance
        slide_id: InstanceId,
        /// What triggered the change
        cause: AdvanceCause,
    },

    /// Deck replaced
    DeckRebuilt {
        /// New deck length
        length: usize,
    },

    /// Jump buffer contents changed (empty string when cleared)
    JumpBufferChanged {
        /// Current buffer contents
        buffer: String,
    },

    /// A committed jump named a slide that does not exist
    JumpRejected {
        /// The digits that were committed
        requested: String,
    },
}
