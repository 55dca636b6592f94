//! Normalized weather record returned to clients.
//!
//! Every provider field is optional. Absent values serialize as `null`, never
//! as zero, so clients can tell "not reported" from a real reading.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// A value with the unit string the provider reported alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
}

/// Wind conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct WindRecord {
    /// Wind speed value (e.g. 11.1)
    pub speed: Option<f64>,
    /// Unit of `speed` (e.g. "km/h")
    pub unit: Option<String>,
    /// Localized compass direction (e.g. "SW")
    pub direction: Option<String>,
}

/// Current conditions for a resolved location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    /// Resolved location label (e.g. "Abidjan, Ivory Coast")
    pub location: String,
    /// Temperature value in metric units
    pub temperature: Option<f64>,
    /// Unit of `temperature` as reported by the provider (e.g. "C")
    pub unit: Option<String>,
    /// Condition text (e.g. "Partly sunny")
    pub weather_text: Option<String>,
    pub has_precipitation: Option<bool>,
    pub is_day_time: Option<bool>,
    /// Provider icon code (AccuWeather 1..44)
    pub weather_icon: Option<u32>,
    /// Relative humidity percentage
    pub relative_humidity: Option<u32>,
    pub wind: Option<WindRecord>,
    pub pressure: Option<Measurement>,
    pub real_feel_temperature: Option<Measurement>,
    pub uv_index: Option<u32>,
    pub uv_index_text: Option<String>,
    /// "Rain", "Snow", "Ice" or "Mixed" when precipitating
    pub precipitation_type: Option<String>,
}
