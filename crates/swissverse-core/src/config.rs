use crate::error::{Result, SwissverseError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SWISSVERSE_DIR: &str = ".swissverse";
pub const CONFIG_FILE: &str = ".swissverse/config.yaml";

/// Env var that overrides the API key from the config file, so the key can
/// stay out of version-controlled configs.
pub const API_KEY_ENV: &str = "SWISSVERSE_API_KEY";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// BackendConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted backend, e.g. `https://project.example.co`.
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl BackendConfig {
    /// API key with the env override applied.
    pub fn effective_api_key(&self) -> String {
        std::env::var(API_KEY_ENV).unwrap_or_else(|_| self.api_key.clone())
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
}

impl Config {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig {
                url: url.into(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = config_path(root);
        if !path.exists() {
            return Err(SwissverseError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&config_path(root), data.as_bytes())
    }

    /// Save only when no config exists yet. Returns false if one is already
    /// on disk, leaving it untouched.
    pub fn save_if_missing(&self, root: &Path) -> Result<bool> {
        let data = serde_yaml::to_string(self)?;
        crate::io::write_if_missing(&config_path(root), data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(SwissverseError::NotInitialized)
        ));
    }

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new("https://content.swissverse.org");
        config.backend.api_key = "anon-key".to_string();
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.backend.url, "https://content.swissverse.org");
        assert_eq!(loaded.backend.api_key, "anon-key");
        assert_eq!(loaded.backend.timeout_secs, 10);
    }

    #[test]
    fn save_if_missing_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let first = Config::new("https://content.swissverse.org");
        assert!(first.save_if_missing(dir.path()).unwrap());

        let second = Config::new("https://elsewhere.example");
        assert!(!second.save_if_missing(dir.path()).unwrap());
        assert_eq!(
            Config::load(dir.path()).unwrap().backend.url,
            "https://content.swissverse.org"
        );
    }

    #[test]
    fn timeout_defaults_when_absent() {
        let config: Config =
            serde_yaml::from_str("backend:\n  url: https://x\n  api_key: k\n").unwrap();
        assert_eq!(config.backend.timeout_secs, 10);
    }
}
