//! Configuration for the outbound upstream client.
//!
//! Every provider call is bounded by a timeout so a slow upstream cannot stall
//! the location fallback chain.

use crate::services::upstream_client::UpstreamClientConfig;
use std::env;

impl UpstreamClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let request_timeout_seconds = env::var("UPSTREAM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(defaults.request_timeout_seconds);

        let connect_timeout_seconds = env::var("UPSTREAM_CONNECT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(defaults.connect_timeout_seconds);

        let enable_detailed_logging = env::var("UPSTREAM_DETAILED_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.enable_detailed_logging);

        Self {
            request_timeout_seconds,
            connect_timeout_seconds,
            enable_detailed_logging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;
    use std::env;

    #[test]
    fn test_upstream_config_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::remove_var("UPSTREAM_TIMEOUT_SECONDS");
            env::remove_var("UPSTREAM_CONNECT_TIMEOUT_SECONDS");
            env::remove_var("UPSTREAM_DETAILED_LOGGING");
        }

        let config = UpstreamClientConfig::from_env();
        assert_eq!(config.request_timeout_seconds, 8);
        assert_eq!(config.connect_timeout_seconds, 3);
        assert!(config.enable_detailed_logging);
    }

    #[test]
    fn test_upstream_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::set_var("UPSTREAM_TIMEOUT_SECONDS", "5");
            env::set_var("UPSTREAM_CONNECT_TIMEOUT_SECONDS", "0");
            env::set_var("UPSTREAM_DETAILED_LOGGING", "false");
        }

        let config = UpstreamClientConfig::from_env();
        assert_eq!(config.request_timeout_seconds, 5);
        // Zero would disable the bound entirely, so it is ignored
        assert_eq!(config.connect_timeout_seconds, 3);
        assert!(!config.enable_detailed_logging);

        unsafe {
            env::remove_var("UPSTREAM_TIMEOUT_SECONDS");
            env::remove_var("UPSTREAM_CONNECT_TIMEOUT_SECONDS");
            env::remove_var("UPSTREAM_DETAILED_LOGGING");
        }
    }
}
