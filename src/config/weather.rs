//! Weather provider and location fallback configuration.

use super::ConfigError;
use std::env;
use url::Url;

pub const DEFAULT_ACCUWEATHER_BASE_URL: &str = "https://dataservice.accuweather.com";
pub const DEFAULT_IP_GEOLOCATION_BASE_URL: &str = "http://ip-api.com";
/// AccuWeather location key for Abidjan, Côte d'Ivoire
pub const DEFAULT_LOCATION_KEY: &str = "223019";
pub const DEFAULT_LOCATION_LABEL: &str = "Abidjan, Ivory Coast";

/// Configuration for the weather provider and the location resolver
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub accuweather_api_key: String,
    pub accuweather_base_url: Url,
    pub ip_geolocation_base_url: Url,
    pub default_location_key: String,
    pub default_location_label: String,
}

impl WeatherConfig {
    /// Build a configuration with the given API key and default endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            accuweather_api_key: api_key.into(),
            accuweather_base_url: Url::parse(DEFAULT_ACCUWEATHER_BASE_URL)
                .expect("default AccuWeather URL is valid"),
            ip_geolocation_base_url: Url::parse(DEFAULT_IP_GEOLOCATION_BASE_URL)
                .expect("default ip-api URL is valid"),
            default_location_key: DEFAULT_LOCATION_KEY.to_string(),
            default_location_label: DEFAULT_LOCATION_LABEL.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `ACCUWEATHER_API_KEY` is required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let accuweather_api_key = env::var("ACCUWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("ACCUWEATHER_API_KEY"))?;

        let accuweather_base_url =
            base_url_from_env("ACCUWEATHER_BASE_URL", DEFAULT_ACCUWEATHER_BASE_URL)?;
        let ip_geolocation_base_url =
            base_url_from_env("IP_GEOLOCATION_BASE_URL", DEFAULT_IP_GEOLOCATION_BASE_URL)?;

        let default_location_key = env::var("DEFAULT_LOCATION_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION_KEY.to_string());

        let default_location_label = env::var("DEFAULT_LOCATION_LABEL")
            .ok()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION_LABEL.to_string());

        Ok(Self {
            accuweather_api_key,
            accuweather_base_url,
            ip_geolocation_base_url,
            default_location_key,
            default_location_label,
        })
    }

    /// Point both upstreams at the given base URL (used by tests against a mock server)
    pub fn with_base_urls(mut self, accuweather: Url, ip_geolocation: Url) -> Self {
        self.accuweather_base_url = accuweather;
        self.ip_geolocation_base_url = ip_geolocation;
        self
    }
}

/// Parse an http(s) base URL from the environment
fn base_url_from_env(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(var, &raw)
}

pub(crate) fn parse_base_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
