/// Player configuration
use crate::error::{PlayerError, Result};
use loopdeck_core::types::ProjectKey;
use loopdeck_playback::ClockConfig;
use loopdeck_sync::SyncConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "loopdeck.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub sync: SyncSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSettings {
    #[serde(default = "default_project_key")]
    pub project_key: String,

    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,

    #[serde(default = "default_saved_display_ms")]
    pub saved_display_ms: u64,

    #[serde(default = "default_updated_by")]
    pub updated_by: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_safety_delay_ms")]
    pub safety_delay_ms: u64,

    #[serde(default = "default_slide_secs")]
    pub default_slide_secs: u64,

    /// A headless player never hears a video finish, so the slide duration
    /// caps video slides unless a renderer reports the end
    #[serde(default = "default_external_end_fallback")]
    pub external_end_fallback: bool,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` (or `loopdeck.toml` when present), then applies
    /// `LOOPDECK_<SECTION>__<KEY>` environment overrides, e.g.
    /// `LOOPDECK_SYNC__PROJECT_KEY=lobby`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("LOOPDECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.sync.project_key.trim().is_empty() {
            return Err(PlayerError::Config(
                "Project key is required (set LOOPDECK_SYNC__PROJECT_KEY)".to_string(),
            ));
        }

        if self.sync.autosave_delay_ms == 0 {
            return Err(PlayerError::Config(
                "Autosave delay must be greater than zero".to_string(),
            ));
        }

        if self.storage.database_url.is_empty() {
            return Err(PlayerError::Config("Database URL is required".to_string()));
        }

        Ok(())
    }

    pub fn project_key(&self) -> ProjectKey {
        ProjectKey::new(self.sync.project_key.trim())
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            project_key: self.project_key(),
            autosave_delay: Duration::from_millis(self.sync.autosave_delay_ms),
            saved_display: Duration::from_millis(self.sync.saved_display_ms),
            updated_by: self.sync.updated_by.clone(),
        }
    }

    pub fn clock_config(&self) -> ClockConfig {
        ClockConfig {
            default_slide_duration: Duration::from_secs(self.playback.default_slide_secs),
            safety_delay: Duration::from_millis(self.playback.safety_delay_ms),
            external_end_fallback: self.playback.external_end_fallback,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            project_key: default_project_key(),
            autosave_delay_ms: default_autosave_delay_ms(),
            saved_display_ms: default_saved_display_ms(),
            updated_by: default_updated_by(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            safety_delay_ms: default_safety_delay_ms(),
            default_slide_secs: default_slide_secs(),
            external_end_fallback: default_external_end_fallback(),
        }
    }
}

// Default values
fn default_database_url() -> String {
    "sqlite://loopdeck.db".to_string()
}

fn default_project_key() -> String {
    ProjectKey::default().to_string()
}

fn default_autosave_delay_ms() -> u64 {
    2000
}

fn default_saved_display_ms() -> u64 {
    2000
}

fn default_updated_by() -> String {
    "player".to_string()
}

fn default_safety_delay_ms() -> u64 {
    50
}

fn default_slide_secs() -> u64 {
    20
}

fn default_external_end_fallback() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.sync_config().project_key, SyncConfig::default().project_key);
        assert_eq!(config.sync_config().autosave_delay, Duration::from_secs(2));

        let clock = config.clock_config();
        assert_eq!(clock.default_slide_duration, ClockConfig::default().default_slide_duration);
        assert_eq!(clock.safety_delay, ClockConfig::default().safety_delay);
        assert!(clock.external_end_fallback);
    }

    #[test]
    fn rejects_empty_project_key() {
        let mut config = PlayerConfig::default();
        config.sync.project_key = "  ".to_string();
        assert!(matches!(config.validate(), Err(PlayerError::Config(_))));
    }

    #[test]
    fn rejects_zero_autosave_delay() {
        let mut config = PlayerConfig::default();
        config.sync.autosave_delay_ms = 0;
        assert!(config.validate().is_err());
        config.sync.autosave_delay_ms = 500;
        assert!(config.validate().is_ok());
    }
}
