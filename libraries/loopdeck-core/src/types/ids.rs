/// ID types for LoopDeck entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the persisted deck record shared by every editor and player
///
/// A deployment normally runs a single project called `default`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Create a new project key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProjectKey {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_is_default() {
        assert_eq!(ProjectKey::default().as_str(), "default");
    }

    #[test]
    fn serializes_transparently() {
        let key = ProjectKey::new("booth-a");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"booth-a\"");
    }
}
