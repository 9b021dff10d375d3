// Linkshelf Config Engine
// Loads the server configuration from a JSON file, applies environment
// overrides and validates the result.

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::platform;
use crate::types::config::{ScraperMode, ServerConfig};
use crate::types::errors::ConfigError;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "LINKSHELF_CONFIG";
pub const ENV_BIND: &str = "LINKSHELF_BIND";
pub const ENV_DATA: &str = "LINKSHELF_DATA";
pub const ENV_SCRAPER: &str = "LINKSHELF_SCRAPER";

/// Trait defining the config engine interface.
pub trait ConfigEngineTrait {
    fn load(&mut self) -> Result<ServerConfig, ConfigError>;
    fn get_config(&self) -> &ServerConfig;
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>;
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Config engine that reads `ServerConfig` from a JSON file on disk.
pub struct ConfigEngine {
    config_path: PathBuf,
    config: ServerConfig,
}

impl ConfigEngine {
    /// Creates a new ConfigEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `linkshelf.json` in the platform config directory.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path = path_override
            .unwrap_or_else(|| platform::get_config_dir().join("linkshelf.json"));
        Self {
            config_path,
            config: ServerConfig::default(),
        }
    }

    /// Resolves the config from `LINKSHELF_CONFIG` (or the platform default)
    /// plus the process environment.
    pub fn from_env() -> Result<ServerConfig, ConfigError> {
        let path = std::env::var(ENV_CONFIG).ok().map(PathBuf::from);
        let mut engine = ConfigEngine::new(path);
        engine.load()?;
        engine.apply_overrides(|key| std::env::var(key).ok())?;
        engine.validate()?;
        Ok(engine.get_config().clone())
    }
}

impl ConfigEngineTrait for ConfigEngine {
    /// Loads the config file. A missing file yields defaults.
    fn load(&mut self) -> Result<ServerConfig, ConfigError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            self.config = ServerConfig::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::Io(format!("Failed to read config file: {}", e)))?;

        self.config = serde_json::from_str(&content).map_err(|e| {
            ConfigError::Serialization(format!("Failed to parse config file: {}", e))
        })?;

        info!(path = %self.config_path.display(), "config loaded");
        Ok(self.config.clone())
    }

    fn get_config(&self) -> &ServerConfig {
        &self.config
    }

    /// Applies `LINKSHELF_BIND`, `LINKSHELF_DATA` and `LINKSHELF_SCRAPER`.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            self.config.bind_addr = bind;
        }
        if let Some(data) = lookup(ENV_DATA) {
            self.config.data_path = PathBuf::from(data);
        }
        if let Some(mode) = lookup(ENV_SCRAPER) {
            self.config.scraper = ScraperMode::parse(&mode).ok_or_else(|| {
                ConfigError::InvalidValue(format!("{}: unknown scraper mode '{}'", ENV_SCRAPER, mode))
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.bind_addr.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue(format!("bind_addr '{}': {}", self.config.bind_addr, e))
        })?;
        if self.config.scraper_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "scraper_timeout_secs must be positive".to_string(),
            ));
        }
        if self.config.data_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("data_path is empty".to_string()));
        }
        Ok(())
    }
}
