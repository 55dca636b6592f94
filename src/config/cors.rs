//! CORS configuration for the browser client.

use std::env;

/// Configuration for the CORS headers middleware
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
    pub allowed_methods: String,
    pub allowed_headers: String,
    pub max_age_seconds: u32,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "*".to_string(),
            allowed_methods: "GET, OPTIONS".to_string(),
            allowed_headers: "Content-Type, X-Request-ID".to_string(),
            max_age_seconds: 86400,
        }
    }
}

impl CorsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let allowed_origin = env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.allowed_origin);

        let max_age_seconds = env::var("CORS_MAX_AGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_age_seconds);

        Self {
            allowed_origin,
            max_age_seconds,
            ..defaults
        }
    }

    /// Whether responses vary by request origin
    pub fn is_wildcard(&self) -> bool {
        self.allowed_origin == "*"
    }
}
