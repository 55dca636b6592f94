//! HTTP server binding configuration.

use std::env;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 5001;

/// Where the HTTP server listens
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("127.0.0.1:{DEFAULT_PORT}"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// `BIND_ADDRESS` wins outright. Otherwise the host is `0.0.0.0` inside a
    /// container and `127.0.0.1` elsewhere, with the port taken from `PORT`.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let in_container = is_container_environment(
            env::var("KUBERNETES_SERVICE_HOST").ok().as_deref(),
            env::var("DOCKER_CONTAINER").ok().as_deref(),
            Path::new("/.dockerenv").exists(),
        );

        Self {
            bind_address: resolve_bind_address(
                env::var("BIND_ADDRESS").ok().as_deref(),
                in_container,
                port,
            ),
        }
    }
}

pub(crate) fn is_container_environment(
    k8s_service_host: Option<&str>,
    docker_container: Option<&str>,
    dockerenv_exists: bool,
) -> bool {
    k8s_service_host.is_some() || docker_container.is_some() || dockerenv_exists
}

pub(crate) fn resolve_bind_address(
    bind_override: Option<&str>,
    in_container: bool,
    port: u16,
) -> String {
    if let Some(bind) = bind_override.filter(|b| !b.trim().is_empty()) {
        return bind.trim().to_string();
    }

    if in_container {
        format!("0.0.0.0:{port}")
    } else {
        format!("127.0.0.1:{port}")
    }
}
