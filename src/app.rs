//! App Core for Linkshelf.
//!
//! Central struct wiring configuration, the link store and the preview
//! scraper. Shared by the HTTP server and the stdio RPC server.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::managers::link_manager::LinkManager;
use crate::services::scraper::{self, PreviewScraper};
use crate::store::DocumentFile;
use crate::types::config::ServerConfig;

/// Central application state. Cheap to clone.
#[derive(Clone)]
pub struct App {
    pub config: Arc<ServerConfig>,
    pub links: Arc<LinkManager>,
}

impl App {
    /// Builds the app from `config`, choosing the scraper it names.
    pub fn new(config: ServerConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scraper = scraper::from_config(&config)
            .map_err(|e| format!("Scraper init failed: {}", e))?;
        Ok(Self::with_scraper(config, scraper))
    }

    /// Builds the app with an explicit scraper.
    pub fn with_scraper(config: ServerConfig, scraper: Arc<dyn PreviewScraper>) -> Self {
        let file = DocumentFile::new(&config.data_path, config.seed_collections.clone());
        let links = LinkManager::new(
            file,
            scraper,
            Duration::from_secs(config.scraper_timeout_secs),
        );
        Self {
            config: Arc::new(config),
            links: Arc::new(links),
        }
    }

    /// Startup sequence: make sure the document exists so the first read
    /// already sees the seed collections on disk.
    pub async fn startup(&self) -> Result<(), crate::types::errors::StoreError> {
        let file = self.links.document_file();
        file.ensure_exists().await?;
        info!(
            data = %file.path().display(),
            scraper = ?self.config.scraper,
            "linkshelf ready"
        );
        Ok(())
    }
}
