/// Authored slide records
use super::settings::{BuildScope, BuildStyle, Settings};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Renderer that draws a slide
///
/// Unknown type strings are kept verbatim so a deck written by a newer editor
/// survives a round-trip through an older one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlideType {
    Hero,
    Testimonial,
    LogoGrid,
    ClientLogos,
    ServiceCard,
    SplitContent,
    FullscreenImage,
    FullscreenVideo,
    Impact,
    /// Type string this build does not know about
    Other(String),
}

impl SlideType {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hero => "hero",
            Self::Testimonial => "testimonial",
            Self::LogoGrid => "logo-grid",
            Self::ClientLogos => "client-logos",
            Self::ServiceCard => "service-card",
            Self::SplitContent => "split-content",
            Self::FullscreenImage => "fullscreen-image",
            Self::FullscreenVideo => "fullscreen-video",
            Self::Impact => "impact",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for SlideType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "hero" => Self::Hero,
            "testimonial" => Self::Testimonial,
            "logo-grid" => Self::LogoGrid,
            "client-logos" => Self::ClientLogos,
            "service-card" => Self::ServiceCard,
            "split-content" => Self::SplitContent,
            "fullscreen-image" => Self::FullscreenImage,
            "fullscreen-video" => Self::FullscreenVideo,
            "impact" => Self::Impact,
            _ => Self::Other(s),
        }
    }
}

impl From<SlideType> for String {
    fn from(kind: SlideType) -> Self {
        match kind {
            SlideType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SlideType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-slide enter/exit transition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlideTransition {
    None,
    Fade,
    BlurFade,
    Shatter,
    Glitch,
    Spiral,
    Explode,
    Liquid,
    /// Transition name this build does not know about (rendered as a fade)
    Other(String),
}

impl SlideTransition {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Fade => "fade",
            Self::BlurFade => "blurFade",
            Self::Shatter => "shatter",
            Self::Glitch => "glitch",
            Self::Spiral => "spiral",
            Self::Explode => "explode",
            Self::Liquid => "liquid",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for SlideTransition {
    fn from(s: String) -> Self {
        match s.as_str() {
            "none" => Self::None,
            "fade" => Self::Fade,
            "blurFade" => Self::BlurFade,
            "shatter" => Self::Shatter,
            "glitch" => Self::Glitch,
            "spiral" => Self::Spiral,
            "explode" => Self::Explode,
            "liquid" => Self::Liquid,
            _ => Self::Other(s),
        }
    }
}

impl From<SlideTransition> for String {
    fn from(transition: SlideTransition) -> Self {
        match transition {
            SlideTransition::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// One authored content unit of the presentation
///
/// The playback core only reads `kind`, `duration_sec`, `featured` and the
/// `video`/`loop` payload fields; everything else is opaque and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub kind: SlideType,

    /// Dwell time in seconds; `None` means the player default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<SlideTransition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_scope: Option<BuildScope>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_style: Option<BuildStyle>,

    /// Type-specific fields (title, image, logos, ...)
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Slide {
    /// Create an empty slide of the given type
    pub fn new(kind: SlideType) -> Self {
        Self {
            id: None,
            kind,
            duration_sec: None,
            featured: false,
            transition: None,
            build_scope: None,
            build_style: None,
            payload: Map::new(),
        }
    }

    /// Builder: set the dwell time in seconds
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_sec = Some(seconds);
        self
    }

    /// Builder: flag the slide as featured
    #[must_use]
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Builder: set the authored id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: set a type-specific payload field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Authored dwell time, or `None` when unset or not a usable number
    pub fn duration_sec(&self) -> Option<f64> {
        self.duration_sec
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
    }

    /// Whether playback of this slide ends on a renderer signal instead of a timer
    ///
    /// True for non-looping video slides that actually carry a video.
    pub fn is_externally_timed(&self) -> bool {
        if self.kind != SlideType::FullscreenVideo {
            return false;
        }
        let has_video = self
            .payload
            .get("video")
            .and_then(Value::as_str)
            .is_some_and(|src| !src.is_empty());
        let loops = self.payload.get("loop").and_then(Value::as_bool) == Some(true);
        has_video && !loops
    }

    /// Copy without local-only fields (payload keys starting with `_`)
    ///
    /// Persisted records only carry authored content, never playback-instance
    /// identities such as `_slideId`.
    #[must_use]
    pub fn authored(&self) -> Self {
        let mut slide = self.clone();
        slide.payload.retain(|key, _| !key.starts_with('_'));
        slide
    }

    /// Build scope for this slide: the slide override, else the deck setting
    pub fn effective_build_scope(&self, settings: &Settings) -> BuildScope {
        self.build_scope.unwrap_or(settings.build_scope)
    }

    /// Build style for this slide: the slide override, else the deck setting
    pub fn effective_build_style(&self, settings: &Settings) -> BuildStyle {
        self.build_style.unwrap_or(settings.build_style)
    }
}
