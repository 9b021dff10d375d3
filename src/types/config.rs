use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::link::Collection;
use crate::platform;

/// Which scraper backs link previews.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScraperMode {
    /// Placeholder image and heuristic metadata after a short delay.
    Mock,
    /// Fetch the page and read its title, description and `og:image`.
    Http,
    /// No scraping at all.
    Off,
}

impl ScraperMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mock" => Some(ScraperMode::Mock),
            "http" => Some(ScraperMode::Http),
            "off" | "none" => Some(ScraperMode::Off),
            _ => None,
        }
    }
}

/// Server configuration, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub data_path: PathBuf,
    pub scraper: ScraperMode,
    pub scraper_timeout_secs: u64,
    pub mock_delay_ms: DelayRange,
    pub user_agent: String,
    pub seed_collections: Vec<Collection>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            data_path: platform::get_data_dir().join("dataStore.json"),
            scraper: ScraperMode::Mock,
            scraper_timeout_secs: 20,
            mock_delay_ms: DelayRange::default(),
            user_agent: format!("linkshelf/{}", env!("CARGO_PKG_VERSION")),
            seed_collections: vec![Collection::new("col-inbox", "Inbox")],
        }
    }
}

/// Inclusive range of milliseconds the mock scraper sleeps for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    pub fn none() -> Self {
        Self { min: 0, max: 0 }
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self { min: 1000, max: 3000 }
    }
}
