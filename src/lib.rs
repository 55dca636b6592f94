//! Meteo Proxy - weather backend for the MeteoSran chat client
//!
//! A small Actix Web service that answers "what is the weather here?" for a
//! browser client. It resolves which location to query through an ordered
//! fallback chain, fetches current conditions from AccuWeather, and returns
//! them in a stable, normalized shape:
//! - Fixed default city on request
//! - Reverse geocoding of caller coordinates
//! - IP geolocation of the caller
//! - Fixed default city as the last resort
//!
//! ## Architecture
//!
//! - `models/` - Location and weather types, request/response models
//! - `services/` - Resolver, weather service, provider clients, metrics
//! - `handlers/` - HTTP handlers and the app factory
//! - `middleware/` - Request ids, HTTP metrics, CORS
//! - `config/` - Environment-driven configuration
//! - `utils/` - Client IP extraction, route labels, log redaction
//!
//! ## Quick Start
//!
//! ```no_run
//! use meteo_proxy::{create_app, AppConfig, AppState};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = AppConfig::from_env().expect("configuration");
//!     let state = AppState::from_config(&config).expect("startup");
//!     let app = create_app(state);
//!     // Hand the factory to actix_web::HttpServer
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{
    AppConfig, ConfigError, CorsConfig, MetricsConfig, ServerConfig, WeatherConfig,
};
pub use handlers::{
    create_app, create_openapi_spec, current_weather, get_metrics, health, version, AppState,
    StartupError,
};
pub use middleware::{CorsHeaders, MetricsMiddleware, RequestId, RequestIdMiddleware};
pub use models::{
    Coordinates, ErrorResponse, HealthResponse, LocationQuery, Measurement, ResolutionStrategy,
    ResolvedLocation, VersionResponse, WeatherQuery, WeatherRecord, WindRecord,
};
pub use services::{
    AccuWeatherClient, AppMetrics, IpGeolocator, LocationResolver, UpstreamClient,
    UpstreamClientConfig, UpstreamClientMetrics, UpstreamError, WeatherError, WeatherService,
};
pub use utils::{extract_client_ip, extract_route_pattern, redact_api_key};
