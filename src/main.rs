use actix_web::HttpServer;
use meteo_proxy::{create_app, AppConfig, AppState};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the tracing subscriber: `RUST_LOG` filters, `LOG_FORMAT=json` switches format
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let state = AppState::from_config(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialise services");
        std::io::Error::other(e)
    })?;

    let bind_address = config.server.bind_address.clone();
    tracing::info!(
        bind_address = %bind_address,
        accuweather = %config.weather.accuweather_base_url,
        default_location = %config.weather.default_location_label,
        "Weather proxy server starting"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
