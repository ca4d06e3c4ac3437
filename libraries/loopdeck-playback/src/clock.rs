//! Playback clock - timer-driven slide advancement
//!
//! Walks an index through the deck forever: each slide arms one timer for its
//! dwell time, and firing it advances (wrapping at the end). Non-looping video
//! slides instead wait for the renderer's end signal.
//!
//! Every transition cancels the armed timer before arming the next one, so at
//! most one advance is ever pending. Fired handles that are not the current
//! one are ignored, which keeps a late timer from advancing a rebuilt deck.

use crate::{
    error::Result,
    events::{AdvanceCause, PlaybackEvent},
    jump::JumpBuffer,
    types::{ClockConfig, ClockState, DeckPosition, Direction, PlaybackDeck, RenderFrame, SlideInstance},
};
use loopdeck_core::{types::Settings, Scheduler, TimerHandle};
use tracing::debug;

/// Single-threaded slide playback state machine
pub struct PlaybackClock<S: Scheduler> {
    scheduler: S,
    config: ClockConfig,
    deck: PlaybackDeck,

    // Always < deck.len() while the deck is non-empty
    index: usize,

    state: ClockState,
    jump: JumpBuffer,

    // The only advance timer that may be pending
    timer: Option<TimerHandle>,

    // Event queue for renderer/UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<S: Scheduler> PlaybackClock<S> {
    /// Create an idle clock with an empty deck
    pub fn new(scheduler: S, config: ClockConfig) -> Self {
        Self {
            scheduler,
            config,
            deck: PlaybackDeck::default(),
            index: 0,
            state: ClockState::Idle,
            jump: JumpBuffer::new(),
            timer: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Start playing `deck` from the first slide
    ///
    /// An empty deck leaves the clock idle with no timer armed.
    pub fn start(&mut self, deck: PlaybackDeck) {
        self.cancel_timer();
        self.deck = deck;
        self.index = 0;
        self.emit(PlaybackEvent::DeckRebuilt {
            length: self.deck.len(),
        });

        if self.deck.is_empty() {
            debug!("Empty deck, clock idle");
            self.set_state(ClockState::Idle);
            return;
        }

        self.show(None, AdvanceCause::Start);
    }

    /// Stop playback, keeping the deck and position
    ///
    /// Cancels the armed timer and clears the jump buffer. A later
    /// `rebuild_deck` or `start` resumes playback.
    pub fn stop(&mut self) {
        self.cancel_timer();
        self.cancel_jump();
        self.set_state(ClockState::Idle);
    }

    /// Handle a fired timer
    ///
    /// Returns `true` if the handle was the armed advance timer and the clock
    /// moved to the next slide; stale handles are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.timer != Some(handle) {
            debug!(handle = handle.id(), "Ignoring stale advance timer");
            return false;
        }
        self.timer = None;
        self.advance(AdvanceCause::Timer);
        true
    }

    /// Renderer signal: the current self-timed slide finished
    ///
    /// Only honoured while awaiting an external end; any fallback timer for
    /// the slide is cancelled so the slide advances exactly once.
    pub fn on_external_end(&mut self) -> bool {
        if self.state != ClockState::AwaitingExternalEnd {
            debug!(state = ?self.state, "Ignoring external end outside a self-timed slide");
            return false;
        }
        self.advance(AdvanceCause::ExternalEnd);
        true
    }

    /// Step one slide forward or backward, wrapping at both ends
    pub fn step(&mut self, direction: Direction) -> bool {
        let len = self.deck.len();
        if len == 0 {
            return false;
        }

        let previous = self.index;
        self.index = match direction {
            Direction::Forward => (previous + 1) % len,
            Direction::Backward => (previous + len - 1) % len,
        };
        self.show(Some(previous), AdvanceCause::Step);
        true
    }

    /// Step forward
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        self.step(Direction::Forward)
    }

    /// Step backward
    pub fn previous(&mut self) -> bool {
        self.step(Direction::Backward)
    }

    /// Replace the deck, keeping the index when it is still in range
    ///
    /// An out-of-range index is reset to the first slide. The timer is always
    /// re-armed for the slide now at the index; an empty deck goes idle.
    pub fn rebuild_deck(&mut self, deck: PlaybackDeck) {
        self.cancel_timer();
        self.deck = deck;
        self.emit(PlaybackEvent::DeckRebuilt {
            length: self.deck.len(),
        });

        if self.deck.is_empty() {
            self.index = 0;
            self.set_state(ClockState::Idle);
            return;
        }

        let previous = self.index;
        if self.index >= self.deck.len() {
            debug!(index = self.index, len = self.deck.len(), "Clamping index after rebuild");
            self.index = 0;
        }

        if self.state == ClockState::Idle {
            self.show(None, AdvanceCause::Start);
        } else {
            self.show(Some(previous), AdvanceCause::Rebuild);
        }
    }

    // ===== Jump To Slide =====

    /// Append a digit (0-9) to the jump buffer
    pub fn jump_digit(&mut self, digit: u8) -> Result<()> {
        self.jump.push_digit(digit)?;
        self.emit(PlaybackEvent::JumpBufferChanged {
            buffer: self.jump.as_str().to_string(),
        });
        Ok(())
    }

    /// Jump to the buffered one-based slide number
    ///
    /// The buffer is cleared whether or not the number is in range; an
    /// out-of-range number is a no-op.
    pub fn commit_jump(&mut self) -> bool {
        if self.jump.is_empty() {
            return false;
        }

        let requested = self.jump.as_str().to_string();
        let target = self.jump.take_index();
        self.emit(PlaybackEvent::JumpBufferChanged {
            buffer: String::new(),
        });

        match target.filter(|index| *index < self.deck.len()) {
            Some(index) => {
                let previous = self.index;
                self.index = index;
                self.show(Some(previous), AdvanceCause::Jump);
                true
            }
            None => {
                debug!(requested = %requested, len = self.deck.len(), "Jump out of range");
                self.emit(PlaybackEvent::JumpRejected { requested });
                false
            }
        }
    }

    /// Clear the jump buffer without navigating
    pub fn cancel_jump(&mut self) {
        if !self.jump.is_empty() {
            self.jump.clear();
            self.emit(PlaybackEvent::JumpBufferChanged {
                buffer: String::new(),
            });
        }
    }

    // ===== State Queries =====

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn deck(&self) -> &PlaybackDeck {
        &self.deck
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Current slide instance, `None` for an empty deck
    pub fn current(&self) -> Option<&SlideInstance> {
        self.deck.get(self.index)
    }

    /// Position for the slide counter, `None` for an empty deck
    pub fn position(&self) -> Option<DeckPosition> {
        (!self.deck.is_empty()).then_some(DeckPosition {
            index: self.index,
            count: self.deck.len(),
        })
    }

    /// Frame to hand to the renderer
    pub fn frame<'a>(&'a self, settings: &'a Settings) -> Option<RenderFrame<'a>> {
        Some(RenderFrame {
            instance: self.current()?,
            settings,
            position: self.position()?,
        })
    }

    /// Digits typed so far for a pending jump
    pub fn jump_buffer(&self) -> &str {
        self.jump.as_str()
    }

    /// Whether an advance timer is armed
    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Handle of the armed advance timer
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Take all queued events (oldest first)
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    fn advance(&mut self, cause: AdvanceCause) {
        let len = self.deck.len();
        if len == 0 {
            self.cancel_timer();
            self.set_state(ClockState::Idle);
            return;
        }
        let previous = self.index;
        self.index = (previous + 1) % len;
        self.show(Some(previous), cause);
    }

    /// Announce the slide at `index` and arm its timer
    fn show(&mut self, previous_index: Option<usize>, cause: AdvanceCause) {
        if let Some(instance) = self.deck.get(self.index) {
            debug!(
                index = self.index,
                slide_id = %instance.id,
                ?cause,
                "Showing slide"
            );
            self.pending_events.push(PlaybackEvent::SlideChanged {
                index: self.index,
                previous_index,
                slide_id: instance.id,
                cause,
            });
        }
        self.arm_current();
    }

    fn arm_current(&mut self) {
        self.cancel_timer();

        let Some((dwell, external)) = self.deck.get(self.index).map(|instance| {
            (
                self.config.dwell(&instance.slide),
                instance.slide.is_externally_timed(),
            )
        }) else {
            self.set_state(ClockState::Idle);
            return;
        };

        if external {
            self.set_state(ClockState::AwaitingExternalEnd);
            if !self.config.external_end_fallback {
                return;
            }
        } else {
            self.set_state(ClockState::Playing);
        }

        let handle = self.scheduler.arm(dwell);
        debug!(handle = handle.id(), dwell_ms = dwell.as_millis() as u64, "Armed advance timer");
        self.timer = Some(handle);
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn set_state(&mut self, state: ClockState) {
        if self.state != state {
            self.state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}
