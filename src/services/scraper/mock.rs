//! Mock scraper: waits a random delay, then returns a placeholder image and
//! metadata guessed from the URL.

use std::time::Duration;

use async_trait::async_trait;
use ring::rand::{SecureRandom, SystemRandom};
use url::Url;

use super::PreviewScraper;
use crate::types::config::DelayRange;
use crate::types::errors::ScraperError;
use crate::types::preview::Preview;

const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/400/300";

/// Scraper that never touches the network.
pub struct MockScraper {
    delay: DelayRange,
    rng: SystemRandom,
}

impl MockScraper {
    pub fn new(delay: DelayRange) -> Self {
        Self {
            delay,
            rng: SystemRandom::new(),
        }
    }

    /// A mock that answers immediately.
    pub fn instant() -> Self {
        Self::new(DelayRange::none())
    }

    /// Picks a delay in `[min, max]` milliseconds.
    fn pick_delay(&self) -> Duration {
        let DelayRange { min, max } = self.delay;
        if max <= min {
            return Duration::from_millis(min);
        }
        let mut buf = [0u8; 8];
        let offset = match self.rng.fill(&mut buf) {
            Ok(()) => u64::from_le_bytes(buf) % (max - min + 1),
            Err(_) => 0,
        };
        Duration::from_millis(min + offset)
    }

    /// Placeholder image URL, unique per link.
    pub fn placeholder_image(link_id: &str) -> String {
        format!("{}?random={}", PLACEHOLDER_IMAGE_BASE, link_id)
    }

    /// Title and description guessed from the URL alone.
    pub fn guess_metadata(url: &Url) -> (String, String) {
        let host = url.host_str().unwrap_or_default();
        if host == "reactjs.org" || host.ends_with(".reactjs.org") {
            return (
                "React – A JavaScript library for building user interfaces".to_string(),
                "A popular JavaScript library for building modern, scalable user interfaces."
                    .to_string(),
            );
        }
        (
            format!("Content from {}", host),
            format!("Saved from {}. No description was scraped.", host),
        )
    }
}

#[async_trait]
impl PreviewScraper for MockScraper {
    async fn scrape(&self, url: &str, link_id: &str) -> Result<Preview, ScraperError> {
        let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl(format!("{}: {}", url, e)))?;

        let delay = self.pick_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let (title, description) = Self::guess_metadata(&parsed);
        Ok(Preview {
            preview_image_url: Some(Self::placeholder_image(link_id)),
            title: Some(title),
            description: Some(description),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
