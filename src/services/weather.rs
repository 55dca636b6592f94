//! Weather service: fetch current conditions and normalize them.

use crate::models::location::ResolvedLocation;
use crate::models::weather::{Measurement, WeatherRecord, WindRecord};
use crate::services::accuweather::{AccuWeatherClient, AccuWeatherError, CurrentConditions, UnitPair};

/// Failures once a location has been resolved
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The provider answered with a non-OK status
    #[error("Weather provider returned {status}: {body}")]
    Provider {
        status: u16,
        reason: String,
        body: String,
    },

    /// The provider answered OK with no conditions for the location
    #[error("No weather data found for location {0}")]
    NoData(String),

    /// Anything else: transport failure, timeout, undecodable payload
    #[error("Internal weather error: {0}")]
    Internal(String),
}

impl WeatherError {
    /// Message safe to show to API clients
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Provider { reason, .. } => {
                format!("Failed to fetch weather data from AccuWeather: {reason}")
            }
            WeatherError::NoData(_) => {
                "No weather data found for this location or invalid response.".to_string()
            }
            WeatherError::Internal(_) => {
                "Internal server error while fetching weather data.".to_string()
            }
        }
    }

    /// Metric label for the fetch outcome
    pub fn outcome(&self) -> &'static str {
        match self {
            WeatherError::Provider { .. } => "provider_error",
            WeatherError::NoData(_) => "no_data",
            WeatherError::Internal(_) => "internal_error",
        }
    }
}

impl From<AccuWeatherError> for WeatherError {
    fn from(err: AccuWeatherError) -> Self {
        match err {
            AccuWeatherError::Status { status, body } => WeatherError::Provider {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown status").to_string(),
                body,
            },
            other => WeatherError::Internal(other.to_string()),
        }
    }
}

/// Fetches current conditions for resolved locations
#[derive(Clone)]
pub struct WeatherService {
    provider: AccuWeatherClient,
}

impl WeatherService {
    pub fn new(provider: AccuWeatherClient) -> Self {
        Self { provider }
    }

    /// Fetch and normalize current conditions. One provider call, no retries.
    pub async fn fetch_current(&self, location: &ResolvedLocation) -> Result<WeatherRecord, WeatherError> {
        let conditions = self
            .provider
            .current_conditions(&location.provider_location_id)
            .await
            .map_err(|e| {
                let err = WeatherError::from(e);
                match &err {
                    WeatherError::Provider { status, body, .. } => tracing::error!(
                        location_key = %location.provider_location_id,
                        status = *status,
                        body = %body,
                        "AccuWeather current conditions request failed"
                    ),
                    other => tracing::error!(
                        location_key = %location.provider_location_id,
                        error = %other,
                        "Error fetching weather data"
                    ),
                }
                err
            })?;

        let first = conditions
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NoData(location.provider_location_id.clone()))?;

        Ok(normalize(&location.label, first))
    }
}

/// Map a provider conditions entry onto the stable record shape.
///
/// Units are passed through as reported; nothing is converted or range checked.
pub fn normalize(label: &str, conditions: CurrentConditions) -> WeatherRecord {
    let temperature = metric(conditions.temperature.as_ref());

    let wind = conditions.wind.map(|wind| {
        let speed = metric(wind.speed.as_ref());
        WindRecord {
            speed: speed.as_ref().map(|m| m.value),
            unit: speed.map(|m| m.unit),
            direction: wind.direction.and_then(|d| d.localized.or(d.english)),
        }
    });

    WeatherRecord {
        location: label.to_string(),
        temperature: temperature.as_ref().map(|m| m.value),
        unit: temperature.map(|m| m.unit),
        weather_text: conditions.weather_text,
        has_precipitation: conditions.has_precipitation,
        is_day_time: conditions.is_day_time,
        weather_icon: conditions.weather_icon,
        relative_humidity: conditions.relative_humidity,
        wind,
        pressure: metric(conditions.pressure.as_ref()),
        real_feel_temperature: metric(conditions.real_feel_temperature.as_ref()),
        uv_index: conditions.uv_index,
        uv_index_text: conditions.uv_index_text,
        precipitation_type: conditions.precipitation_type,
    }
}

/// The metric reading, present only when both value and unit were reported
fn metric(pair: Option<&UnitPair>) -> Option<Measurement> {
    let reading = pair?.metric.as_ref()?;
    Some(Measurement {
        value: reading.value?,
        unit: reading.unit.clone()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conditions(value: serde_json::Value) -> CurrentConditions {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_payload() {
        let record = normalize(
            "Abidjan, Ivory Coast",
            conditions(json!({
                "WeatherText": "Partly sunny",
                "WeatherIcon": 3,
                "HasPrecipitation": false,
                "PrecipitationType": null,
                "IsDayTime": true,
                "Temperature": {
                    "Metric": { "Value": 29.4, "Unit": "C", "UnitType": 17 },
                    "Imperial": { "Value": 85.0, "Unit": "F", "UnitType": 18 }
                },
                "RealFeelTemperature": { "Metric": { "Value": 33.1, "Unit": "C" } },
                "RelativeHumidity": 74,
                "Wind": {
                    "Direction": { "Degrees": 225, "Localized": "SW", "English": "SW" },
                    "Speed": { "Metric": { "Value": 14.8, "Unit": "km/h" } }
                },
                "UVIndex": 6,
                "UVIndexText": "High",
                "Pressure": { "Metric": { "Value": 1012.0, "Unit": "mb" } }
            })),
        );

        assert_eq!(record.location, "Abidjan, Ivory Coast");
        assert_eq!(record.temperature, Some(29.4));
        assert_eq!(record.unit.as_deref(), Some("C"));
        assert_eq!(record.weather_text.as_deref(), Some("Partly sunny"));
        assert_eq!(record.weather_icon, Some(3));
        assert_eq!(record.relative_humidity, Some(74));
        assert_eq!(
            record.wind,
            Some(WindRecord {
                speed: Some(14.8),
                unit: Some("km/h".to_string()),
                direction: Some("SW".to_string()),
            })
        );
        assert_eq!(
            record.pressure,
            Some(Measurement { value: 1012.0, unit: "mb".to_string() })
        );
        assert_eq!(record.real_feel_temperature.map(|m| m.value), Some(33.1));
        assert_eq!(record.uv_index, Some(6));
        assert_eq!(record.uv_index_text.as_deref(), Some("High"));
        assert!(record.precipitation_type.is_none());
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let record = normalize(
            "Somewhere",
            conditions(json!({
                "Temperature": { "Imperial": { "Value": 85.0, "Unit": "F" } },
                "Pressure": { "Metric": { "Value": 1012.0 } },
                "Wind": { "Direction": { "English": "N" } }
            })),
        );

        // Only imperial reported: no metric temperature, and no zero stand-in
        assert_eq!(record.temperature, None);
        assert_eq!(record.unit, None);
        // A value without its unit is not a measurement
        assert_eq!(record.pressure, None);
        assert_eq!(
            record.wind,
            Some(WindRecord { speed: None, unit: None, direction: Some("N".to_string()) })
        );
        assert_eq!(record.relative_humidity, None);
        assert_eq!(record.has_precipitation, None);
    }

    #[test]
    fn test_values_pass_through_unvalidated() {
        let record = normalize(
            "Somewhere",
            conditions(json!({ "RelativeHumidity": 140, "UVIndex": 15 })),
        );
        assert_eq!(record.relative_humidity, Some(140));
        assert_eq!(record.uv_index, Some(15));
    }

    #[test]
    fn test_provider_status_maps_to_provider_error() {
        let err = WeatherError::from(AccuWeatherError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "upstream down".to_string(),
        });

        match &err {
            WeatherError::Provider { status, reason, body } => {
                assert_eq!(*status, 503);
                assert_eq!(reason, "Service Unavailable");
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.user_message().contains("Service Unavailable"));
        assert_eq!(err.outcome(), "provider_error");
    }

    #[test]
    fn test_decode_failure_maps_to_internal() {
        let decode = serde_json::from_str::<Vec<CurrentConditions>>("{not json").unwrap_err();
        let err = WeatherError::from(AccuWeatherError::Decode(decode));
        assert!(matches!(err, WeatherError::Internal(_)));
        assert_eq!(err.user_message(), "Internal server error while fetching weather data.");
    }
}
