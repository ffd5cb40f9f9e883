//! Application configuration management.
//!
//! Configuration is stored at `~/.config/programboard/config.json`.
//! Each field can also be set through an environment variable, so a
//! `.env` file is enough to point the tool at a sheet.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "programboard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment override for the sheet id
const SHEET_ID_VAR: &str = "PROGRAMBOARD_SHEET_ID";

/// Environment override for the full feed URL
const FEED_URL_VAR: &str = "PROGRAMBOARD_FEED_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub sheet_id: Option<String>,
    pub feed_url: Option<String>,
}

impl Config {
    /// Load the config file, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        if let Ok(id) = std::env::var(SHEET_ID_VAR) {
            config.sheet_id = Some(id);
        }
        if let Ok(url) = std::env::var(FEED_URL_VAR) {
            config.feed_url = Some(url);
        }
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Resolve the CSV export URL for the configured sheet. An explicit
    /// feed URL wins over a sheet id.
    pub fn resolve_feed_url(&self) -> Result<String> {
        if let Some(ref url) = self.feed_url {
            return Ok(url.clone());
        }
        if let Some(ref id) = self.sheet_id {
            return Ok(format!(
                "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid=0",
                id
            ));
        }
        Err(anyhow::anyhow!(
            "No feed configured. Set {} or {}, or run with --set-sheet <id>.",
            SHEET_ID_VAR,
            FEED_URL_VAR
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url_from_sheet_id() {
        let config = Config {
            sheet_id: Some("SHEET42".to_string()),
            feed_url: None,
        };
        assert_eq!(
            config.resolve_feed_url().expect("url"),
            "https://docs.google.com/spreadsheets/d/SHEET42/export?format=csv&gid=0"
        );
    }

    #[test]
    fn test_explicit_feed_url_wins() {
        let config = Config {
            sheet_id: Some("SHEET42".to_string()),
            feed_url: Some("https://example.com/feed.csv".to_string()),
        };
        assert_eq!(
            config.resolve_feed_url().expect("url"),
            "https://example.com/feed.csv"
        );
    }

    #[test]
    fn test_unconfigured_feed_is_an_error() {
        assert!(Config::default().resolve_feed_url().is_err());
    }
}
