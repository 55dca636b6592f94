//! API request and response models for the HTTP surface.

use crate::models::location::{Coordinates, LocationQuery};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}

/// Error body returned by the weather endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
    /// Upstream response body, when the provider itself failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Query parameters for the current weather endpoint.
///
/// Values are kept as raw strings: malformed coordinates disable the
/// coordinates strategy instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherQuery {
    /// Latitude in decimal degrees
    pub lat: Option<String>,
    /// Longitude in decimal degrees
    pub lon: Option<String>,
    /// Any non-empty value forces the default location
    pub fixed: Option<String>,
}

impl WeatherQuery {
    /// Read the parameters from a raw query string.
    ///
    /// Never fails: the first occurrence of a repeated key wins, unknown keys
    /// are ignored and bad percent-encoding is decoded lossily.
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = WeatherQuery::default();

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "lat" => &mut query.lat,
                "lon" => &mut query.lon,
                "fixed" => &mut query.fixed,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        query
    }

    /// Interpret the raw parameters as a location query
    pub fn to_location_query(&self) -> LocationQuery {
        let fixed = self.fixed.as_deref().is_some_and(|value| !value.is_empty());

        let coordinates = match (parse_degrees(&self.lat), parse_degrees(&self.lon)) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
            _ => None,
        };

        LocationQuery { coordinates, fixed }
    }
}

fn parse_degrees(raw: &Option<String>) -> Option<f64> {
    raw.as_deref()?.trim().parse().ok()
}
