//! Location resolution with an ordered fallback chain.
//!
//! Strategies are tried in [`ResolutionStrategy::ORDER`]; each attempt either
//! yields a location or declines, and the first location wins. Failures inside
//! a strategy are logged and swallowed, so resolution always produces a
//! location: the final default strategy needs no network call.

use crate::models::location::{Coordinates, LocationQuery, ResolutionStrategy, ResolvedLocation};
use crate::services::accuweather::AccuWeatherClient;
use crate::services::geolocation::IpGeolocator;
use std::net::IpAddr;
use tracing::{debug, info, warn};

/// Picks the location to fetch weather for
#[derive(Clone)]
pub struct LocationResolver {
    provider: AccuWeatherClient,
    geolocator: IpGeolocator,
    default_key: String,
    default_label: String,
}

impl LocationResolver {
    pub fn new(
        provider: AccuWeatherClient,
        geolocator: IpGeolocator,
        default_key: impl Into<String>,
        default_label: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            geolocator,
            default_key: default_key.into(),
            default_label: default_label.into(),
        }
    }

    /// Resolve a query to a provider location. Never fails.
    pub async fn resolve(&self, query: &LocationQuery, client_ip: Option<IpAddr>) -> ResolvedLocation {
        for strategy in ResolutionStrategy::ORDER {
            if let Some(resolved) = self.attempt(strategy, query, client_ip).await {
                info!(
                    strategy = %strategy,
                    location_key = %resolved.provider_location_id,
                    label = %resolved.label,
                    "Resolved weather location"
                );
                return resolved;
            }
        }

        // ORDER ends with Default, which always yields
        self.default_location(ResolutionStrategy::Default)
    }

    /// Run one strategy; `None` means "not applicable or failed, try the next"
    async fn attempt(
        &self,
        strategy: ResolutionStrategy,
        query: &LocationQuery,
        client_ip: Option<IpAddr>,
    ) -> Option<ResolvedLocation> {
        match strategy {
            ResolutionStrategy::Fixed => query.fixed.then(|| self.default_location(strategy)),
            ResolutionStrategy::Coordinates => {
                let coordinates = query.coordinates?;
                self.reverse_geocode(coordinates, strategy).await
            }
            ResolutionStrategy::IpGeolocation => self.locate_by_ip(client_ip?).await,
            ResolutionStrategy::Default => Some(self.default_location(strategy)),
        }
    }

    async fn locate_by_ip(&self, ip: IpAddr) -> Option<ResolvedLocation> {
        let coordinates = match self.geolocator.locate(ip).await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                debug!(ip = %ip, error = %e, "IP geolocation failed, falling back");
                return None;
            }
        };

        // A failed lookup here drops to the default rather than sending raw
        // coordinates to the provider: it only ever receives location keys.
        self.reverse_geocode(coordinates, ResolutionStrategy::IpGeolocation)
            .await
    }

    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
        strategy: ResolutionStrategy,
    ) -> Option<ResolvedLocation> {
        let geoposition = match self.provider.geoposition_search(coordinates).await {
            Ok(geoposition) => geoposition,
            Err(e) => {
                warn!(
                    strategy = %strategy,
                    coordinates = %coordinates,
                    error = %e,
                    "Reverse geocoding failed, falling back"
                );
                return None;
            }
        };

        let Some(key) = geoposition.location_key() else {
            debug!(strategy = %strategy, coordinates = %coordinates, "Geoposition response had no location key");
            return None;
        };

        let mut label = geoposition.label();
        if label.is_empty() {
            label = format!("{:.2}, {:.2}", coordinates.lat, coordinates.lon);
        }

        Some(ResolvedLocation {
            provider_location_id: key.to_string(),
            label,
            strategy,
        })
    }

    fn default_location(&self, strategy: ResolutionStrategy) -> ResolvedLocation {
        ResolvedLocation {
            provider_location_id: self.default_key.clone(),
            label: self.default_label.clone(),
            strategy,
        }
    }
}
