//! Business logic and service layer modules.
//!
//! Location resolution, weather fetching and normalization, the provider
//! clients they call, and metrics collection.

pub mod accuweather;
pub mod geolocation;
pub mod location;
pub mod metrics;
pub mod upstream_client;
pub mod weather;

pub use accuweather::{AccuWeatherClient, AccuWeatherError};
pub use geolocation::{GeolocationError, IpGeolocator};
pub use location::LocationResolver;
pub use metrics::*;
pub use upstream_client::{UpstreamClient, UpstreamClientConfig, UpstreamClientMetrics, UpstreamError};
pub use weather::{normalize, WeatherError, WeatherService};
