// Linkshelf services
// Stateless helpers around the store: configuration loading and link preview scraping.

pub mod config_engine;
pub mod scraper;
