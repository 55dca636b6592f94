//! Location resolution types.

use std::fmt;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting non-finite or out-of-range values
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        valid.then_some(Self { lat, lon })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// What the caller asked to be resolved.
///
/// `fixed` takes precedence over `coordinates` when both are present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationQuery {
    pub coordinates: Option<Coordinates>,
    pub fixed: bool,
}

impl LocationQuery {
    pub fn fixed() -> Self {
        Self {
            coordinates: None,
            fixed: true,
        }
    }

    pub fn at(coordinates: Coordinates) -> Self {
        Self {
            coordinates: Some(coordinates),
            fixed: false,
        }
    }
}

/// The strategies tried to pick a location, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStrategy {
    /// Caller explicitly asked for the default location
    Fixed,
    /// Reverse geocoding of caller-supplied coordinates
    Coordinates,
    /// Reverse geocoding of coordinates derived from the caller's IP
    IpGeolocation,
    /// Hardcoded default, always succeeds
    Default,
}

impl ResolutionStrategy {
    /// The order in which strategies are attempted; the first success wins
    pub const ORDER: [ResolutionStrategy; 4] = [
        ResolutionStrategy::Fixed,
        ResolutionStrategy::Coordinates,
        ResolutionStrategy::IpGeolocation,
        ResolutionStrategy::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStrategy::Fixed => "fixed",
            ResolutionStrategy::Coordinates => "coordinates",
            ResolutionStrategy::IpGeolocation => "ip_geolocation",
            ResolutionStrategy::Default => "default",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A location the weather provider can be queried for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Opaque provider key (AccuWeather location key), never raw coordinates
    pub provider_location_id: String,
    /// Human readable place name, e.g. "Abidjan, Lagunes, Ivory Coast"
    pub label: String,
    /// Which strategy produced this location
    pub strategy: ResolutionStrategy,
}

/// Join place name parts with ", ", skipping missing or blank ones
pub fn assemble_label<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
