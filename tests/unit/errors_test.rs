use linkshelf::types::errors::*;

// === StoreError Tests ===

#[test]
fn store_error_display_variants() {
    assert_eq!(
        StoreError::Io("disk full".to_string()).to_string(),
        "Store I/O error: disk full"
    );
    assert_eq!(
        StoreError::Serialization("trailing comma".to_string()).to_string(),
        "Store serialization error: trailing comma"
    );
    assert_eq!(
        StoreError::InvalidInput("url is required".to_string()).to_string(),
        "Invalid input: url is required"
    );
}

#[test]
fn store_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(StoreError::Io("x".to_string()));
    assert!(err.source().is_none());
}

// === ScraperError Tests ===

#[test]
fn scraper_error_display_variants() {
    assert_eq!(
        ScraperError::InvalidUrl("ftp://x".to_string()).to_string(),
        "Invalid URL: ftp://x"
    );
    assert_eq!(
        ScraperError::Network("dns".to_string()).to_string(),
        "Scraper network error: dns"
    );
    assert_eq!(ScraperError::Timeout(20).to_string(), "Scraper timed out after 20s");
    assert_eq!(ScraperError::HttpStatus(404).to_string(), "Scraper got HTTP status 404");
    assert_eq!(
        ScraperError::NotHtml("application/pdf".to_string()).to_string(),
        "Response is not HTML: application/pdf"
    );
}

// === ConfigError Tests ===

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::Io("denied".to_string()).to_string(),
        "Config I/O error: denied"
    );
    assert_eq!(
        ConfigError::Serialization("eof".to_string()).to_string(),
        "Config serialization error: eof"
    );
    assert_eq!(
        ConfigError::InvalidValue("bind_addr".to_string()).to_string(),
        "Invalid config value: bind_addr"
    );
}

#[test]
fn errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StoreError>();
    assert_send_sync::<ScraperError>();
    assert_send_sync::<ConfigError>();
}
