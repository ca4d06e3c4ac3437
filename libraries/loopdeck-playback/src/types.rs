//! Core types for slide playback

use crate::error::PlaybackError;
use loopdeck_core::types::{Settings, Slide};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Stable identity of one slide instance in a built deck
///
/// Distinguishes an original slide from its Nth featured copy. The string form
/// (`slide-3`, `featured-0-original`, `featured-1-copy-0`) is what renderers
/// use as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum InstanceId {
    /// Non-featured slide at `index` in the authored list
    Slide { index: usize },

    /// First occurrence of the `featured`-th featured slide
    FeaturedOriginal { featured: usize },

    /// Extra occurrence number `copy` of the `featured`-th featured slide
    FeaturedCopy { featured: usize, copy: usize },
}

impl InstanceId {
    /// Position among featured slides, `None` for non-featured instances
    pub fn featured_index(&self) -> Option<usize> {
        match self {
            Self::Slide { .. } => None,
            Self::FeaturedOriginal { featured } | Self::FeaturedCopy { featured, .. } => {
                Some(*featured)
            }
        }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slide { index } => write!(f, "slide-{}", index),
            Self::FeaturedOriginal { featured } => write!(f, "featured-{}-original", featured),
            Self::FeaturedCopy { featured, copy } => {
                write!(f, "featured-{}-copy-{}", featured, copy)
            }
        }
    }
}

impl FromStr for InstanceId {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlaybackError::InvalidInstanceId(s.to_string());

        if let Some(index) = s.strip_prefix("slide-") {
            let index = index.parse().map_err(|_| invalid())?;
            return Ok(Self::Slide { index });
        }

        let rest = s.strip_prefix("featured-").ok_or_else(invalid)?;
        let (featured, kind) = rest.split_once('-').ok_or_else(invalid)?;
        let featured = featured.parse().map_err(|_| invalid())?;

        if kind == "original" {
            return Ok(Self::FeaturedOriginal { featured });
        }
        let copy = kind
            .strip_prefix("copy-")
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        Ok(Self::FeaturedCopy { featured, copy })
    }
}

impl From<InstanceId> for String {
    fn from(id: InstanceId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for InstanceId {
    type Error = PlaybackError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One occurrence of a slide in the deck
///
/// Serializes as the authored slide plus a synthetic `_slideId` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideInstance {
    #[serde(rename = "_slideId")]
    pub id: InstanceId,

    #[serde(flatten)]
    pub slide: Slide,
}

/// Fully expanded, ordered sequence of slide instances actually played
///
/// Never mutated in place: every change to the authored slides or to the
/// featured repeat count produces a new deck.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackDeck {
    instances: Vec<SlideInstance>,
}

impl PlaybackDeck {
    /// Wrap an already ordered list of instances
    pub fn new(instances: Vec<SlideInstance>) -> Self {
        Self { instances }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideInstance> {
        self.instances.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlideInstance> {
        self.instances.iter()
    }

    pub fn as_slice(&self) -> &[SlideInstance] {
        &self.instances
    }

    /// Instance ids in deck order
    pub fn ids(&self) -> Vec<InstanceId> {
        self.instances.iter().map(|instance| instance.id).collect()
    }
}

impl<'a> IntoIterator for &'a PlaybackDeck {
    type Item = &'a SlideInstance;
    type IntoIter = std::slice::Iter<'a, SlideInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}

impl FromIterator<SlideInstance> for PlaybackDeck {
    fn from_iter<I: IntoIterator<Item = SlideInstance>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Playback clock state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    /// Empty deck (or not started): no timer armed
    Idle,

    /// Timer armed for the current slide
    Playing,

    /// Current slide advances on the renderer's end signal (non-looping video)
    AwaitingExternalEnd,
}

/// Manual step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// Configuration for the playback clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Dwell time for slides without a usable `durationSec` (default: 20s)
    pub default_slide_duration: Duration,

    /// Added to every dwell time to avoid frame-boundary races (default: 50ms)
    pub safety_delay: Duration,

    /// Also arm the duration timer on externally timed slides, as a ceiling
    /// in case the renderer never reports the end (default: false)
    pub external_end_fallback: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            default_slide_duration: Duration::from_secs(20),
            safety_delay: Duration::from_millis(50),
            external_end_fallback: false,
        }
    }
}

impl ClockConfig {
    /// Time the current slide stays on screen before the advance fires
    ///
    /// A `durationSec` too large for a `Duration` falls back to the default.
    pub fn dwell(&self, slide: &Slide) -> Duration {
        let base = slide
            .duration_sec()
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            .unwrap_or(self.default_slide_duration);
        base.saturating_add(self.safety_delay)
    }
}

/// Position of the current slide, as shown by the slide counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPosition {
    /// Zero-based deck index
    pub index: usize,

    /// Total instances in the deck
    pub count: usize,
}

impl DeckPosition {
    /// One-based slide number, matching the numbers typed for a jump
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Everything the renderer needs to draw the current slide
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub instance: &'a SlideInstance,
    pub settings: &'a Settings,
    pub position: DeckPosition,
}
