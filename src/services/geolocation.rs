//! IP address geolocation via the ip-api.com JSON contract.

use crate::models::location::Coordinates;
use crate::services::upstream_client::{UpstreamClient, UpstreamError};
use serde::Deserialize;
use std::net::IpAddr;
use url::Url;

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Errors from an IP geolocation lookup
#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("Address {0} is not publicly routable")]
    NonPublicAddress(IpAddr),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Geolocation service returned status {0}")]
    Status(u16),

    #[error("Geolocation lookup failed: {0}")]
    Lookup(String),

    #[error("Failed to decode geolocation response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Resolves caller IP addresses to approximate coordinates
#[derive(Clone)]
pub struct IpGeolocator {
    http: UpstreamClient,
    base_url: Url,
}

impl IpGeolocator {
    pub fn new(http: UpstreamClient, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Approximate coordinates for an IP address
    pub async fn locate(&self, ip: IpAddr) -> Result<Coordinates, GeolocationError> {
        if !is_publicly_routable(ip) {
            return Err(GeolocationError::NonPublicAddress(ip));
        }

        let ip_segment = ip.to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["json", ip_segment.as_str()]);

        let response = self.http.get(&url).await?;
        if !response.status().is_success() {
            return Err(GeolocationError::Status(response.status().as_u16()));
        }

        let body = response.text().await.map_err(UpstreamError::Network)?;
        let parsed: IpApiResponse = serde_json::from_str(&body)?;

        if parsed.status.as_deref() != Some("success") {
            return Err(GeolocationError::Lookup(
                parsed.message.unwrap_or_else(|| "unknown failure".to_string()),
            ));
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon).ok_or_else(|| {
                GeolocationError::Lookup(format!("coordinates out of range: {lat},{lon}"))
            }),
            _ => Err(GeolocationError::Lookup("response carried no coordinates".to_string())),
        }
    }
}

/// ip-api cannot place loopback, private or link-local addresses
pub(crate) fn is_publicly_routable(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast())
        }
        IpAddr::V6(v6) => {
            let unique_local = (v6.segments()[0] & 0xfe00) == 0xfc00;
            let link_local = (v6.segments()[0] & 0xffc0) == 0xfe80;
            !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_publicly_routable() {
        assert!(is_publicly_routable("41.66.28.10".parse().unwrap()));
        assert!(is_publicly_routable("2001:4860:4860::8888".parse().unwrap()));

        assert!(!is_publicly_routable("127.0.0.1".parse().unwrap()));
        assert!(!is_publicly_routable("10.1.2.3".parse().unwrap()));
        assert!(!is_publicly_routable("192.168.0.4".parse().unwrap()));
        assert!(!is_publicly_routable("169.254.1.1".parse().unwrap()));
        assert!(!is_publicly_routable("::1".parse().unwrap()));
        assert!(!is_publicly_routable("fd00::1".parse().unwrap()));
        assert!(!is_publicly_routable("fe80::1".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_private_address_skips_network() {
        use crate::services::upstream_client::UpstreamClientConfig;

        let http = UpstreamClient::new(UpstreamClientConfig::default(), None).unwrap();
        // Unroutable base: the call would fail loudly if it were attempted
        let geolocator = IpGeolocator::new(http, Url::parse("http://127.0.0.1:9").unwrap());

        let result = geolocator.locate("192.168.1.20".parse().unwrap()).await;
        assert!(matches!(result, Err(GeolocationError::NonPublicAddress(_))));
    }
}
