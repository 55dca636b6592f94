//! Outbound HTTP client for weather and geolocation providers.
//!
//! Each call is a single attempt bounded by the reqwest client's request
//! timeout. Calls are logged with the API key redacted and recorded in
//! per-destination Prometheus metrics.
//! There are no retries and no state shared between requests beyond the
//! connection pool kept by reqwest.

use crate::utils::redact::redact_api_key;
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Configuration for the upstream client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamClientConfig {
    /// Upper bound for a whole call, connect through body (in seconds)
    pub request_timeout_seconds: u64,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Log every call at info level instead of debug
    pub enable_detailed_logging: bool,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 8,
            connect_timeout_seconds: 3,
            enable_detailed_logging: true,
        }
    }
}

/// Metrics for upstream calls
#[derive(Clone)]
pub struct UpstreamClientMetrics {
    /// Upstream requests by destination and outcome
    pub requests_total: CounterVec,

    /// Upstream request duration by destination
    pub request_duration_seconds: HistogramVec,

    /// Timeouts by destination
    pub timeouts_total: CounterVec,
}

impl UpstreamClientMetrics {
    /// Create and register the upstream metrics
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "upstream_requests_total",
                "Total upstream provider requests by destination and outcome",
            ),
            &["destination", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_request_duration_seconds",
                "Duration of upstream provider requests",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["destination"],
        )?;

        let timeouts_total = CounterVec::new(
            Opts::new("upstream_timeouts_total", "Total upstream timeouts by destination"),
            &["destination"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(timeouts_total.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
            timeouts_total,
        })
    }
}

/// Errors that can occur while talking to an upstream
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

/// Single-attempt HTTP client with timeouts, logging and metrics
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamClientConfig,
    metrics: Option<UpstreamClientMetrics>,
}

impl UpstreamClient {
    /// Create a new upstream client
    pub fn new(
        config: UpstreamClientConfig,
        metrics: Option<UpstreamClientMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    /// Issue a GET request.
    ///
    /// Any HTTP status is returned as a response; only transport failures and
    /// timeouts are errors.
    pub async fn get(&self, url: &Url) -> Result<reqwest::Response, UpstreamError> {
        let destination = destination_of(url);
        let logged_url = redact_api_key(url.as_str());

        if !matches!(url.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidUrl(logged_url));
        }

        let timeout = Duration::from_secs(self.config.request_timeout_seconds);
        let start = Instant::now();
        let result = self.client.get(url.clone()).send().await;
        let duration = start.elapsed();

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                if self.config.enable_detailed_logging {
                    info!(
                        destination = %destination,
                        url = %logged_url,
                        status,
                        duration_ms = duration.as_millis(),
                        "Upstream request completed"
                    );
                } else {
                    debug!(destination = %destination, status, "Upstream request completed");
                }
                let outcome = if response.status().is_success() { "success" } else { "http_error" };
                self.record(&destination, outcome, duration);
                Ok(response)
            }
            Err(e) if e.is_timeout() => {
                warn!(
                    destination = %destination,
                    url = %logged_url,
                    timeout_seconds = timeout.as_secs(),
                    "Upstream request timed out"
                );
                self.record(&destination, "timeout", duration);
                self.record_timeout(&destination);
                Err(UpstreamError::Timeout(timeout))
            }
            Err(e) => {
                warn!(
                    destination = %destination,
                    url = %logged_url,
                    error = %e,
                    duration_ms = duration.as_millis(),
                    "Upstream request failed with network error"
                );
                self.record(&destination, "network_error", duration);
                Err(UpstreamError::Network(e))
            }
        }
    }

    fn record(&self, destination: &str, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics
                .requests_total
                .with_label_values(&[destination, outcome])
                .inc();
            metrics
                .request_duration_seconds
                .with_label_values(&[destination])
                .observe(duration.as_secs_f64());
        }
    }

    fn record_timeout(&self, destination: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.timeouts_total.with_label_values(&[destination]).inc();
        }
    }
}

/// Host (and port, when explicit) used to group metrics and logs
fn destination_of(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_bound_every_call() {
        let config = UpstreamClientConfig::default();
        assert!((5..=10).contains(&config.request_timeout_seconds));
        assert!(config.connect_timeout_seconds <= config.request_timeout_seconds);
    }

    #[test]
    fn test_metrics_creation() {
        let registry = Registry::new();
        assert!(UpstreamClientMetrics::new(&registry).is_ok());
        // Registering the same collectors twice is rejected by prometheus
        assert!(UpstreamClientMetrics::new(&registry).is_err());
    }

    #[test]
    fn test_destination_of() {
        let url = Url::parse("https://dataservice.accuweather.com/currentconditions/v1/1").unwrap();
        assert_eq!(destination_of(&url), "dataservice.accuweather.com");

        let url = Url::parse("http://127.0.0.1:8081/json/8.8.8.8").unwrap();
        assert_eq!(destination_of(&url), "127.0.0.1:8081");
    }

    #[tokio::test]
    async fn test_rejects_non_http_urls() {
        let client = UpstreamClient::new(UpstreamClientConfig::default(), None).unwrap();
        let url = Url::parse("file:///etc/hosts").unwrap();
        let result = client.get(&url).await;
        assert!(matches!(result, Err(UpstreamError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out_once_and_is_counted() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .expect(1)
            .mount(&server)
            .await;

        let registry = Registry::new();
        let metrics = UpstreamClientMetrics::new(&registry).unwrap();
        let config = UpstreamClientConfig {
            request_timeout_seconds: 1,
            connect_timeout_seconds: 1,
            enable_detailed_logging: false,
        };
        let client = UpstreamClient::new(config, Some(metrics.clone())).unwrap();

        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
        let result = client.get(&url).await;

        assert!(matches!(result, Err(UpstreamError::Timeout(d)) if d == Duration::from_secs(1)));
        let destination = destination_of(&url);
        assert_eq!(metrics.timeouts_total.with_label_values(&[destination.as_str()]).get(), 1.0);
        assert_eq!(
            metrics
                .requests_total
                .with_label_values(&[destination.as_str(), "timeout"])
                .get(),
            1.0
        );
    }
}
