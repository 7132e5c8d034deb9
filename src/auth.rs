//! API key file loading
//!
//! Fallback key source when the environment has none:
//! - $XDG_DATA_HOME/adaptergen/auth.json (preferred)
//! - ~/.local/share/adaptergen/auth.json (fallback)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Authentication entry for a model provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthEntry {
    /// Simple API key authentication
    #[serde(rename = "api")]
    Api { key: String },
}

impl AuthEntry {
    pub fn api_key(&self) -> &str {
        match self {
            AuthEntry::Api { key } => key,
        }
    }
}

/// Authentication configuration file, keyed by lower-cased provider name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthConfig {
    pub providers: HashMap<String, AuthEntry>,
}

impl AuthConfig {
    /// Load auth config from the default location
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load auth config from a specific path; a missing file is an empty config
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AuthConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("adaptergen").join("auth.json"))
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.providers.get(provider).map(|e| e.api_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_auth_config() {
        let json = r#"{
            "openai": {"type": "api", "key": "sk-xxx"},
            "custom": {"type": "api", "key": "lm-studio"}
        }"#;

        let config: AuthConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.api_key("openai"), Some("sk-xxx"));
        assert_eq!(config.api_key("custom"), Some("lm-studio"));
        assert_eq!(config.api_key("anthropic"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = AuthConfig::load_from(&temp.path().join("auth.json")).unwrap();
        assert!(config.providers.is_empty());
    }
}
