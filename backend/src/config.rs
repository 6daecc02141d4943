//! Configuration management for the Stockcast server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with STOCKCAST_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::ScoringConfig;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Product catalog source
    pub catalog: CatalogConfig,

    /// Forecast feed and cache configuration
    pub forecast: ForecastConfig,

    /// Scoring constants; every field falls back to its default
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Path to the product catalog CSV file
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Directory holding one forecast payload per location (`<location>.json`)
    pub data_dir: String,

    /// Location used when a request does not name one
    pub default_location: String,

    /// Age after which a cached forecast is refreshed in the background
    pub cache_ttl_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOCKCAST_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("catalog.path", "data/catalog.csv")?
            .set_default("forecast.data_dir", "data/forecasts")?
            .set_default("forecast.default_location", "bangkok")?
            .set_default("forecast.cache_ttl_seconds", 10800)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCKCAST_ prefix)
            .add_source(
                Environment::with_prefix("STOCKCAST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
