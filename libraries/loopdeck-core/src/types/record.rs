/// Persisted deck record shapes
use super::{Settings, SettingsPatch, Slide};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author recorded on writes that don't name one
pub const DEFAULT_AUTHOR: &str = "editor";

/// Content transmitted on a save: authored slides plus settings
///
/// Built through [`DeckDraft::new`], which strips local-only slide fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDraft {
    pub slides: Vec<Slide>,
    pub settings: Settings,

    /// Who wrote the draft; stored alongside the record
    #[serde(default = "default_author")]
    pub updated_by: String,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

impl DeckDraft {
    /// Create a draft from local state, keeping authored content only
    pub fn new(slides: &[Slide], settings: &Settings) -> Self {
        Self {
            slides: slides.iter().map(Slide::authored).collect(),
            settings: settings.clone(),
            updated_by: default_author(),
        }
    }

    /// Set the author recorded with the write
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.updated_by = author.into();
        self
    }

    /// Whether the draft carries the same content as `record`
    pub fn matches(&self, record: &DeckRecord) -> bool {
        self.slides == record.slides && self.settings == record.settings
    }
}

/// A stored deck as returned by `PersistenceStore::load`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckRecord {
    pub slides: Vec<Slide>,

    /// Records written before settings were persisted load with defaults
    #[serde(default)]
    pub settings: Settings,

    /// Store-assigned version, incremented on every successful write
    pub version: u64,

    pub updated_at: DateTime<Utc>,
}

/// Change notification pushed by the store for a project key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides: Option<Vec<Slide>>,

    /// Only the settings fields present here replace the receiver's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPatch>,

    pub version: u64,

    pub updated_at: DateTime<Utc>,
}

impl From<DeckRecord> for RemoteChange {
    fn from(record: DeckRecord) -> Self {
        Self {
            slides: Some(record.slides),
            settings: Some(record.settings.into()),
            version: record.version,
            updated_at: record.updated_at,
        }
    }
}

/// Outcome of a successful write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedVersion {
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AspectRatio, SlideType};
    use serde_json::json;

    #[test]
    fn draft_strips_synthetic_fields() {
        let slides = vec![Slide::new(SlideType::Hero).with_field("_slideId", "slide-0")];
        let draft = DeckDraft::new(&slides, &Settings::default());
        assert!(draft.slides[0].payload.is_empty());
        assert_eq!(draft.updated_by, DEFAULT_AUTHOR);
    }

    #[test]
    fn draft_matches_record_content() {
        let slides = vec![Slide::new(SlideType::Impact).with_field("value", "98%")];
        let record = DeckRecord {
            slides: slides.clone(),
            settings: Settings::default(),
            version: 2,
            updated_at: Utc::now(),
        };

        let draft = DeckDraft::new(&slides, &Settings::default()).with_author("booth-1");
        assert!(draft.matches(&record));

        let edited = DeckDraft::new(&[Slide::new(SlideType::Hero)], &Settings::default());
        assert!(!edited.matches(&record));
    }

    #[test]
    fn record_without_settings_uses_defaults() {
        let record: DeckRecord = serde_json::from_value(json!({
            "slides": [{"type": "hero", "title": "Hi"}],
            "version": 7,
            "updatedAt": "2026-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.version, 7);
        assert_eq!(record.settings, Settings::default());
    }

    #[test]
    fn record_with_null_repeats_still_loads() {
        let record: DeckRecord = serde_json::from_value(json!({
            "slides": [{"type": "impact", "featured": true}],
            "settings": {"featuredRepeats": null, "aspectRatio": "4:3"},
            "version": 3,
            "updatedAt": "2026-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.settings.featured_repeats, 2);
        assert_eq!(record.settings.aspect_ratio, AspectRatio::Classic);
    }

    #[test]
    fn change_from_record_carries_full_settings() {
        let mut settings = Settings::default();
        settings.featured_repeats = 0;
        let change = RemoteChange::from(DeckRecord {
            slides: Vec::new(),
            settings: settings.clone(),
            version: 4,
            updated_at: Utc::now(),
        });

        let mut received = Settings::default();
        received.apply(change.settings.as_ref().unwrap());
        assert_eq!(received, settings);
    }
}
