//! Current weather endpoint handler.

use crate::{
    middleware::RequestId,
    models::{ErrorResponse, WeatherQuery},
    services::{AppMetrics, LocationResolver, WeatherError, WeatherService},
    utils::http::extract_client_ip,
};
use actix_web::{http::StatusCode, web, Error, HttpRequest, HttpResponse, ResponseError, Result};
use paperclip::actix::api_v2_operation;

impl ResponseError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Mirror the provider so callers can tell 404 from 4xx from 5xx
            WeatherError::Provider { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            WeatherError::NoData(_) => StatusCode::NOT_FOUND,
            WeatherError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            WeatherError::Provider { body, .. } => Some(body.clone()),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.user_message(),
            details,
        })
    }
}

/// Current weather endpoint
///
/// Resolves the location to query (fixed default, caller coordinates, caller
/// IP, then default) and returns the provider's current conditions in a
/// normalized shape.
#[api_v2_operation(
    summary = "Current Weather Endpoint",
    description = "Returns normalized current conditions. Query parameters: `lat`, `lon` (decimal degrees) and `fixed` (any non-empty value). Location is chosen by priority: `fixed` forces the default city; otherwise `lat`/`lon` are reverse geocoded; otherwise the caller's IP is geolocated; otherwise the default city is used. Malformed or repeated parameters never fail the request; the first occurrence is used. Provider failures are mirrored with their status and body in `details`.",
    tags("Weather"),
    responses(
        (status = 200, description = "Normalized current conditions"),
        (status = 404, description = "No weather data for the resolved location"),
        (status = 500, description = "Internal Server Error"),
        (status = 503, description = "Weather provider unavailable, upstream body in details")
    )
)]
pub async fn current_weather(req: HttpRequest) -> Result<HttpResponse, Error> {
    let (Some(resolver), Some(weather)) = (
        req.app_data::<web::Data<LocationResolver>>(),
        req.app_data::<web::Data<WeatherService>>(),
    ) else {
        tracing::error!("Weather services are not registered on the app");
        return Err(WeatherError::Internal("weather services not configured".to_string()).into());
    };
    let metrics = req.app_data::<web::Data<AppMetrics>>();

    // Read leniently: a malformed query string only disables strategies
    let location_query = WeatherQuery::from_query_string(req.query_string()).to_location_query();
    let client_ip = extract_client_ip(&req);

    let location = resolver.resolve(&location_query, client_ip).await;
    if let Some(metrics) = metrics {
        metrics.record_resolution(location.strategy);
    }

    match weather.fetch_current(&location).await {
        Ok(record) => {
            if let Some(metrics) = metrics {
                metrics.record_fetch("success");
            }
            Ok(HttpResponse::Ok().json(record))
        }
        Err(err) => {
            if let Some(metrics) = metrics {
                metrics.record_fetch(err.outcome());
            }
            tracing::warn!(
                request_id = RequestId::of(&req).as_deref().unwrap_or("unknown"),
                location_key = %location.provider_location_id,
                strategy = %location.strategy,
                outcome = err.outcome(),
                error = %err,
                "Current weather request failed"
            );
            Err(err.into())
        }
    }
}
