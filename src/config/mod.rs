//! Configuration structures and loading utilities.
//!
//! Each concern has its own structure with a `Default` and a `from_env()`
//! constructor. [`AppConfig`] gathers them for the app factory and the binary.

pub mod cors;
pub mod error;
pub mod metrics;
pub mod server;
pub mod upstream;
pub mod weather;

pub use cors::*;
pub use error::*;
pub use metrics::*;
pub use server::*;
pub use weather::*;

use crate::services::upstream_client::UpstreamClientConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub weather: WeatherConfig,
    pub upstream: UpstreamClientConfig,
    pub cors: CorsConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    /// Build a configuration around a weather config, with defaults for the rest
    pub fn new(weather: WeatherConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            weather,
            upstream: UpstreamClientConfig::default(),
            cors: CorsConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }

    /// Load the whole configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            weather: WeatherConfig::from_env()?,
            upstream: UpstreamClientConfig::from_env(),
            cors: CorsConfig::from_env(),
            metrics: MetricsConfig::from_env(),
        })
    }
}

// Tests that touch process environment variables serialize on this
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
