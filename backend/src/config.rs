//! Configuration management for the shelf-life prediction server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides: `SLP_` prefix, `__` between nested keys
//!    (e.g. `SLP_WEATHER__API_KEY`)

use config::{ConfigError, Environment, File, Map};
use serde::Deserialize;
use shared::EngineConfig;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Shelf-life inference service
    pub inference: InferenceConfig,

    /// Engine thresholds; anything left out keeps its built-in value
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key. Requests that need live weather fail without it.
    pub api_key: Option<String>,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InferenceConfig {
    /// Base URL; estimates are requested from `{endpoint}/predict`
    pub endpoint: String,

    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SLP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("weather.timeout_secs", 7)?
            .set_default("inference.endpoint", "http://127.0.0.1:6000")?
            .set_default("inference.timeout_secs", 7)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SLP_ prefix)
            .add_source(environment_source(None))
            .build()?;

        config.try_deserialize()
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `SLP_WEATHER__API_KEY` maps to `weather.api_key`. `vars` replaces the
/// process environment when given.
fn environment_source(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix("SLP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}
