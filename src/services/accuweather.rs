//! AccuWeather API client: geoposition search and current conditions.

use crate::models::location::{assemble_label, Coordinates};
use crate::services::upstream_client::{UpstreamClient, UpstreamError};
use crate::utils::redact::redact_api_key;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// Geoposition search response (subset)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeopositionResponse {
    pub key: Option<String>,
    pub localized_name: Option<String>,
    pub administrative_area: Option<NamedArea>,
    pub country: Option<NamedArea>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamedArea {
    pub localized_name: Option<String>,
}

impl GeopositionResponse {
    /// The location key, when the provider returned a non-empty one
    pub fn location_key(&self) -> Option<&str> {
        self.key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    /// "Locality, Administrative area, Country" with missing parts omitted
    pub fn label(&self) -> String {
        assemble_label([
            self.localized_name.as_deref(),
            self.administrative_area
                .as_ref()
                .and_then(|area| area.localized_name.as_deref()),
            self.country
                .as_ref()
                .and_then(|country| country.localized_name.as_deref()),
        ])
    }
}

/// One entry of the current conditions array (subset, details=true)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentConditions {
    pub weather_text: Option<String>,
    pub weather_icon: Option<u32>,
    pub has_precipitation: Option<bool>,
    pub precipitation_type: Option<String>,
    pub is_day_time: Option<bool>,
    pub temperature: Option<UnitPair>,
    pub real_feel_temperature: Option<UnitPair>,
    pub relative_humidity: Option<u32>,
    pub wind: Option<Wind>,
    #[serde(rename = "UVIndex")]
    pub uv_index: Option<u32>,
    #[serde(rename = "UVIndexText")]
    pub uv_index_text: Option<String>,
    pub pressure: Option<UnitPair>,
}

/// A reading reported in both unit systems
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitPair {
    pub metric: Option<UnitValue>,
    pub imperial: Option<UnitValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitValue {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wind {
    pub direction: Option<WindDirection>,
    pub speed: Option<UnitPair>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WindDirection {
    pub degrees: Option<f64>,
    pub localized: Option<String>,
    pub english: Option<String>,
}

/// Errors from the AccuWeather API
#[derive(Debug, thiserror::Error)]
pub enum AccuWeatherError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("AccuWeather returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode AccuWeather response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the AccuWeather data service
#[derive(Clone)]
pub struct AccuWeatherClient {
    http: UpstreamClient,
    api_key: String,
    base_url: Url,
}

impl AccuWeatherClient {
    pub fn new(http: UpstreamClient, api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url,
        }
    }

    /// Look up the city closest to the given coordinates
    pub async fn geoposition_search(
        &self,
        coordinates: Coordinates,
    ) -> Result<GeopositionResponse, AccuWeatherError> {
        let mut url = self.endpoint(&["locations", "v1", "cities", "geoposition", "search"])?;
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("q", &coordinates.to_string());

        let body = self.fetch(&url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch current conditions for a location key, metric units with details
    pub async fn current_conditions(
        &self,
        location_key: &str,
    ) -> Result<Vec<CurrentConditions>, AccuWeatherError> {
        let mut url = self.endpoint(&["currentconditions", "v1", location_key])?;
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("details", "true")
            .append_pair("metric", "true");

        let body = self.fetch(&url).await?;
        match serde_json::from_str::<serde_json::Value>(&body)? {
            array @ serde_json::Value::Array(_) => Ok(serde_json::from_value(array)?),
            // `null` or an error object on a 200 carries no conditions
            other => {
                tracing::warn!(
                    location_key,
                    kind = json_kind(&other),
                    "AccuWeather current conditions reply is not an array"
                );
                Ok(Vec::new())
            }
        }
    }

    /// GET the URL and return the body of a successful response
    async fn fetch(&self, url: &Url) -> Result<String, AccuWeatherError> {
        let response = self.http.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read AccuWeather error body");
                String::new()
            });
            return Err(AccuWeatherError::Status { status, body });
        }

        response
            .text()
            .await
            .map_err(|e| AccuWeatherError::Upstream(UpstreamError::Network(e)))
    }

    /// Append path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AccuWeatherError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(redact_api_key(self.base_url.as_str())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
