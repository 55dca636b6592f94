//! OpenAPI specification generation and app factory.

use crate::{
    config::{AppConfig, ConfigError, CorsConfig, MetricsConfig},
    handlers::{current_weather, get_metrics, health, version},
    middleware::{CorsHeaders, MetricsMiddleware, RequestIdMiddleware},
    services::{
        AccuWeatherClient, AppMetrics, IpGeolocator, LocationResolver, UpstreamClient,
        WeatherService,
    },
};
use actix_web::App;
use paperclip::actix::{web, OpenApiExt};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Errors that prevent the application from starting
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to create metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Services and configuration shared by every worker.
///
/// Built once so all workers report into the same metrics registry.
#[derive(Clone)]
pub struct AppState {
    pub resolver: LocationResolver,
    pub weather: WeatherService,
    pub metrics: AppMetrics,
    pub metrics_config: MetricsConfig,
    pub cors: CorsConfig,
}

impl AppState {
    /// Wire the provider clients, resolver and weather service from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let metrics = AppMetrics::new()?;
        let http = UpstreamClient::new(config.upstream.clone(), Some(metrics.upstream.clone()))?;

        let accuweather = AccuWeatherClient::new(
            http.clone(),
            config.weather.accuweather_api_key.clone(),
            config.weather.accuweather_base_url.clone(),
        );
        let geolocator = IpGeolocator::new(http, config.weather.ip_geolocation_base_url.clone());

        let resolver = LocationResolver::new(
            accuweather.clone(),
            geolocator,
            config.weather.default_location_key.clone(),
            config.weather.default_location_label.clone(),
        );

        Ok(Self {
            resolver,
            weather: WeatherService::new(accuweather),
            metrics,
            metrics_config: config.metrics.clone(),
            cors: config.cors.clone(),
        })
    }
}

/// Creates the OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Meteo Proxy API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Weather proxy for the MeteoSran chat client.\n\n\
                ## Location resolution\n\
                `GET /api/weather/current` picks the location to query in this order, first success wins:\n\
                1. `fixed` query flag: the configured default city, no network call\n\
                2. `lat` and `lon`: reverse geocoded to a provider location key\n\
                3. Caller IP (`X-Forwarded-For` first entry, else peer address): geolocated, then reverse geocoded\n\
                4. The configured default city\n\
                \n\
                Resolution never fails. Only the weather fetch itself can produce an error.\n\
                \n\
                ## Errors\n\
                - Provider failure: the provider's status code with `{error, details}`, `details` holding the provider body\n\
                - No conditions for the location: 404 with `{error}`\n\
                - Anything else: 500 with `{error}`\n\
                \n\
                ## Units\n\
                Values are metric and carry the unit string reported by the provider. Fields the provider omits are `null`."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application with all routes and middleware.
///
/// Used by the binary and by integration tests.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(CorsHeaders::new(state.cors))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(state.resolver))
        .app_data(web::Data::new(state.weather))
        .app_data(web::Data::new(state.metrics))
        .app_data(web::Data::new(state.metrics_config))
        .service(web::resource("/api/weather/current").route(web::get().to(current_weather)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
