use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ai::{DEFAULT_MODEL, GEMINI_API_URL};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// No timeout unless set.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    GEMINI_API_URL.to_string()
}

fn default_wrap_width() -> usize {
    80
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: None,
            wrap_width: default_wrap_width(),
        }
    }
}

// A set-but-blank variable does not hide the next one.
fn first_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["GEMINI_API_KEY", "API_KEY"]
        .iter()
        .find_map(|name| lookup(*name).filter(|k| !k.trim().is_empty()))
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Let `GEMINI_API_KEY` (or `API_KEY`) override the key from the file.
    ///
    /// Applied once at startup; everything downstream receives the key through `Config`.
    pub fn with_env_overrides(self) -> Self {
        let key = first_api_key(|name| std::env::var(name).ok());
        self.with_api_key(key)
    }

    fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.gemini_api_key = Some(key);
        }
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("instaflow")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_default_config_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instaflow").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout_secs, None);
        assert!(!config.has_api_key());
    }

    #[test]
    fn reads_partial_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "gemini_api_key = \"abc\"\nwrap_width = 60\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("abc"));
        assert_eq!(config.wrap_width, 60);
        assert_eq!(config.api_base_url, GEMINI_API_URL);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "wrap_width = \"wide\"").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::TomlDe(_))));
    }

    #[test]
    fn blank_gemini_key_falls_through_to_api_key() {
        let key = first_api_key(|name| match name {
            "GEMINI_API_KEY" => Some("   ".to_string()),
            "API_KEY" => Some("from-api-key".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("from-api-key"));

        let key = first_api_key(|name| (name == "GEMINI_API_KEY").then(|| "g".to_string()));
        assert_eq!(key.as_deref(), Some("g"));
        assert_eq!(first_api_key(|_| None), None);
    }

    #[test]
    fn blank_override_keeps_file_key() {
        let config = Config {
            gemini_api_key: Some("from-file".to_string()),
            ..Config::default()
        };
        let config = config.with_api_key(Some("  ".to_string()));
        assert_eq!(config.gemini_api_key.as_deref(), Some("from-file"));

        let config = config.with_api_key(Some("from-env".to_string()));
        assert_eq!(config.gemini_api_key.as_deref(), Some("from-env"));
    }
}
