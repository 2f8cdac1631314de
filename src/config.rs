//! Runtime configuration for the store and the command line tool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::ledger::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Default artificial delay while a URL is being generated
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the persisted favorites, history and settings
    pub storage_dir: PathBuf,
    /// Idle period for auto-generation, in milliseconds
    pub debounce_ms: u64,
    /// Loading-state delay after a URL is generated, in milliseconds
    pub loading_delay_ms: u64,
    /// History entries per page
    pub history_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            loading_delay_ms: DEFAULT_LOADING_DELAY.as_millis() as u64,
            history_page_size: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Platform data directory, or `./.job-scout` when there is none
pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("job-scout"))
        .unwrap_or_else(|| PathBuf::from(".job-scout"))
}

impl AppConfig {
    /// Load config from a TOML or JSON file, chosen by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Load `path` when given and present, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_form_behaviour() {
        let config = AppConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.loading_delay(), Duration::from_millis(300));
        assert_eq!(config.history_page_size, 5);
    }

    #[test]
    fn loads_partial_toml_and_json() {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("job-scout.toml");
        std::fs::write(&toml_path, "debounce_ms = 250\nstorage_dir = \"/tmp/js\"\n").unwrap();
        let config = AppConfig::load(&toml_path).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/js"));
        assert_eq!(config.history_page_size, 5);

        let json_path = dir.path().join("job-scout.json");
        std::fs::write(&json_path, r#"{"history_page_size": 10}"#).unwrap();
        assert_eq!(AppConfig::load(&json_path).unwrap().history_page_size, 10);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "debounce_ms = \"soon\"").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }
}
