/// Deck-wide presentation settings
use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound for `Settings::featured_repeats`
pub const MAX_FEATURED_REPEATS: u8 = 5;

/// Featured repeat count when none is stored
pub const DEFAULT_FEATURED_REPEATS: u8 = 2;

/// How consecutive slides hand over to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// Outgoing and incoming slides animate at the same time (crossfade)
    #[default]
    Sync,
    /// Outgoing slide exits fully before the incoming one enters
    Wait,
}

/// Granularity of per-element build animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildScope {
    Off,
    #[default]
    Components,
    Elements,
    Sections,
}

/// Build animation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildStyle {
    Off,
    #[default]
    Classic,
    CascadingFade,
    ScalingCascade,
    SlideIn,
    BlurFocus,
    Typewriter,
}

/// Output canvas aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Standard,
    #[serde(rename = "21:9")]
    Ultrawide,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "custom")]
    Custom,
}

impl AspectRatio {
    /// Canvas size in pixels, `None` for a custom ratio
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Self::Standard => Some((1920, 1080)),
            Self::Ultrawide => Some((2560, 1080)),
            Self::Classic => Some((1440, 1080)),
            Self::Custom => None,
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "16:9",
            Self::Ultrawide => "21:9",
            Self::Classic => "4:3",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Particle density on impact slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FireworksIntensity {
    Low,
    #[default]
    Medium,
    High,
}

/// Deck-wide settings record
///
/// Stored records may be partial: every missing field takes its default, so a
/// record written by an older editor still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub transition_mode: TransitionMode,
    pub build_scope: BuildScope,
    pub build_style: BuildStyle,
    pub aspect_ratio: AspectRatio,

    /// Extra copies of every featured slide (0-5, clamped on load)
    #[serde(deserialize_with = "deserialize_featured_repeats")]
    pub featured_repeats: u8,

    pub fireworks_intensity: FireworksIntensity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transition_mode: TransitionMode::Sync,
            build_scope: BuildScope::Components,
            build_style: BuildStyle::Classic,
            aspect_ratio: AspectRatio::Standard,
            featured_repeats: DEFAULT_FEATURED_REPEATS,
            fireworks_intensity: FireworksIntensity::Medium,
        }
    }
}

impl Settings {
    /// Set featured repeats, clamping into `0..=MAX_FEATURED_REPEATS`
    pub fn set_featured_repeats(&mut self, repeats: u32) {
        self.featured_repeats = repeats.min(u32::from(MAX_FEATURED_REPEATS)) as u8;
    }
}

/// Partial settings carried by a change notification
///
/// Only the fields present overwrite the receiver's current settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_mode: Option<TransitionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_scope: Option<BuildScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_style: Option<BuildStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_featured_repeats_patch"
    )]
    pub featured_repeats: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fireworks_intensity: Option<FireworksIntensity>,
}

impl Settings {
    /// Overwrite the fields present in `patch`
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(mode) = patch.transition_mode {
            self.transition_mode = mode;
        }
        if let Some(scope) = patch.build_scope {
            self.build_scope = scope;
        }
        if let Some(style) = patch.build_style {
            self.build_style = style;
        }
        if let Some(ratio) = patch.aspect_ratio {
            self.aspect_ratio = ratio;
        }
        if let Some(repeats) = patch.featured_repeats {
            self.featured_repeats = repeats;
        }
        if let Some(intensity) = patch.fireworks_intensity {
            self.fireworks_intensity = intensity;
        }
    }
}

impl From<Settings> for SettingsPatch {
    fn from(settings: Settings) -> Self {
        Self {
            transition_mode: Some(settings.transition_mode),
            build_scope: Some(settings.build_scope),
            build_style: Some(settings.build_style),
            aspect_ratio: Some(settings.aspect_ratio),
            featured_repeats: Some(settings.featured_repeats),
            fireworks_intensity: Some(settings.fireworks_intensity),
        }
    }
}

fn clamp_featured_repeats(raw: f64) -> u8 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.floor().min(f64::from(MAX_FEATURED_REPEATS)) as u8
}

// null reads as unset
fn deserialize_featured_repeats<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map_or(DEFAULT_FEATURED_REPEATS, clamp_featured_repeats))
}

fn deserialize_featured_repeats_patch<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(clamp_featured_repeats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.transition_mode, TransitionMode::Sync);
        assert_eq!(settings.build_scope, BuildScope::Components);
        assert_eq!(settings.build_style, BuildStyle::Classic);
        assert_eq!(settings.aspect_ratio, AspectRatio::Standard);
        assert_eq!(settings.featured_repeats, 2);
        assert_eq!(settings.fireworks_intensity, FireworksIntensity::Medium);
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"transitionMode":"wait","buildStyle":"typewriter"}"#)
                .unwrap();
        assert_eq!(settings.transition_mode, TransitionMode::Wait);
        assert_eq!(settings.build_style, BuildStyle::Typewriter);
        assert_eq!(settings.aspect_ratio, AspectRatio::Standard);
        assert_eq!(settings.featured_repeats, 2);
    }

    #[test]
    fn featured_repeats_is_clamped() {
        let high: Settings = serde_json::from_str(r#"{"featuredRepeats":12}"#).unwrap();
        assert_eq!(high.featured_repeats, MAX_FEATURED_REPEATS);

        let negative: Settings = serde_json::from_str(r#"{"featuredRepeats":-3}"#).unwrap();
        assert_eq!(negative.featured_repeats, 0);

        let fractional: Settings = serde_json::from_str(r#"{"featuredRepeats":3.7}"#).unwrap();
        assert_eq!(fractional.featured_repeats, 3);

        let mut settings = Settings::default();
        settings.set_featured_repeats(40);
        assert_eq!(settings.featured_repeats, 5);
    }

    #[test]
    fn null_featured_repeats_uses_default() {
        let settings: Settings =
            serde_json::from_str(r#"{"featuredRepeats":null,"transitionMode":"wait"}"#).unwrap();
        assert_eq!(settings.featured_repeats, DEFAULT_FEATURED_REPEATS);
        assert_eq!(settings.transition_mode, TransitionMode::Wait);
    }

    #[test]
    fn patch_overwrites_present_fields_only() {
        let mut settings = Settings::default();
        settings.featured_repeats = 4;
        settings.aspect_ratio = AspectRatio::Classic;

        let patch: SettingsPatch =
            serde_json::from_str(r#"{"transitionMode":"wait","featuredRepeats":9}"#).unwrap();
        settings.apply(&patch);

        assert_eq!(settings.transition_mode, TransitionMode::Wait);
        assert_eq!(settings.featured_repeats, MAX_FEATURED_REPEATS);
        assert_eq!(settings.aspect_ratio, AspectRatio::Classic);
        assert_eq!(settings.build_style, BuildStyle::Classic);
    }

    #[test]
    fn null_in_patch_leaves_field_alone() {
        let mut settings = Settings::default();
        settings.featured_repeats = 1;
        let patch: SettingsPatch = serde_json::from_str(r#"{"featuredRepeats":null}"#).unwrap();
        settings.apply(&patch);
        assert_eq!(settings.featured_repeats, 1);
    }

    #[test]
    fn full_patch_reproduces_settings() {
        let mut settings = Settings::default();
        settings.build_scope = BuildScope::Sections;
        settings.fireworks_intensity = FireworksIntensity::Low;

        let mut target = Settings::default();
        target.featured_repeats = 0;
        target.apply(&SettingsPatch::from(settings.clone()));
        assert_eq!(target, settings);
    }

    #[test]
    fn aspect_ratio_wire_names() {
        let settings: Settings = serde_json::from_str(r#"{"aspectRatio":"21:9"}"#).unwrap();
        assert_eq!(settings.aspect_ratio, AspectRatio::Ultrawide);
        assert_eq!(settings.aspect_ratio.dimensions(), Some((2560, 1080)));
        assert_eq!(AspectRatio::Custom.dimensions(), None);

        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["aspectRatio"], "16:9");
        assert_eq!(json["buildStyle"], "classic");
        assert_eq!(json["fireworksIntensity"], "medium");
    }
}
