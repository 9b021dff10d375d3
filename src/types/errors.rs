use std::fmt;

// === StoreError ===

/// Errors related to the link store and its backing document.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the document file failed.
    Io(String),
    /// The document could not be parsed or serialized.
    Serialization(String),
    /// The caller supplied input the store cannot accept.
    InvalidInput(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "Store I/O error: {}", msg),
            StoreError::Serialization(msg) => {
                write!(f, "Store serialization error: {}", msg)
            }
            StoreError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === ScraperError ===

/// Errors raised while scraping a preview for a URL.
#[derive(Debug)]
pub enum ScraperError {
    /// The URL could not be parsed or uses an unsupported scheme.
    InvalidUrl(String),
    /// A network error occurred while fetching the page.
    Network(String),
    /// The scrape did not finish within the configured timeout.
    Timeout(u64),
    /// The server answered with a non-success status.
    HttpStatus(u16),
    /// The response is not an HTML page.
    NotHtml(String),
}

impl fmt::Display for ScraperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScraperError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            ScraperError::Network(msg) => write!(f, "Scraper network error: {}", msg),
            ScraperError::Timeout(secs) => write!(f, "Scraper timed out after {}s", secs),
            ScraperError::HttpStatus(code) => write!(f, "Scraper got HTTP status {}", code),
            ScraperError::NotHtml(content_type) => {
                write!(f, "Response is not HTML: {}", content_type)
            }
        }
    }
}

impl std::error::Error for ScraperError {}

// === ConfigError ===

/// Errors related to loading or saving the server configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    Io(String),
    /// Failed to serialize or deserialize the config file.
    Serialization(String),
    /// A configuration value is invalid.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::Serialization(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
