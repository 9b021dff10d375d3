//! Link preview scrapers.
//!
//! Defines the [`PreviewScraper`] trait plus the mock, HTTP and no-op
//! backends. The link store never calls a scraper directly; it goes through
//! [`fetch_preview`], which bounds the call with a timeout and turns every
//! failure into [`Preview::unavailable`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::types::config::{ScraperMode, ServerConfig};
use crate::types::errors::ScraperError;
use crate::types::preview::Preview;

#[cfg(feature = "network")]
pub mod http;
pub mod mock;

#[cfg(feature = "network")]
pub use http::HttpScraper;
pub use mock::MockScraper;

/// Common interface for preview backends.
#[async_trait]
pub trait PreviewScraper: Send + Sync {
    /// Produces a preview for `url`. `link_id` names the link being created.
    async fn scrape(&self, url: &str, link_id: &str) -> Result<Preview, ScraperError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Backend used when scraping is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScraper;

#[async_trait]
impl PreviewScraper for NoopScraper {
    async fn scrape(&self, _url: &str, _link_id: &str) -> Result<Preview, ScraperError> {
        Ok(Preview::unavailable())
    }

    fn name(&self) -> &'static str {
        "off"
    }
}

/// Runs `scraper` with a deadline. Never fails: errors and timeouts degrade
/// to an unavailable preview.
pub async fn fetch_preview(
    scraper: &dyn PreviewScraper,
    url: &str,
    link_id: &str,
    timeout: Duration,
) -> Preview {
    let outcome = match tokio::time::timeout(timeout, scraper.scrape(url, link_id)).await {
        Ok(result) => result,
        Err(_) => Err(ScraperError::Timeout(timeout.as_secs())),
    };

    match outcome {
        Ok(preview) => {
            debug!(scraper = scraper.name(), %url, link_id, "preview scraped");
            preview
        }
        Err(e) => {
            warn!(scraper = scraper.name(), %url, link_id, error = %e, "preview unavailable");
            Preview::unavailable()
        }
    }
}

/// Builds the scraper selected by `config`.
///
/// Without the `network` feature, `http` mode falls back to the mock.
pub fn from_config(config: &ServerConfig) -> Result<Arc<dyn PreviewScraper>, ScraperError> {
    let scraper: Arc<dyn PreviewScraper> = match config.scraper {
        ScraperMode::Off => Arc::new(NoopScraper),
        ScraperMode::Mock => Arc::new(MockScraper::new(config.mock_delay_ms)),
        #[cfg(feature = "network")]
        ScraperMode::Http => Arc::new(HttpScraper::new(
            &config.user_agent,
            Duration::from_secs(config.scraper_timeout_secs),
        )?),
        #[cfg(not(feature = "network"))]
        ScraperMode::Http => {
            warn!("built without the `network` feature, using the mock scraper");
            Arc::new(MockScraper::new(config.mock_delay_ms))
        }
    };
    Ok(scraper)
}
