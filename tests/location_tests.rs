//! Location resolver fallback chain tests.
//!
//! A wiremock server stands in for both AccuWeather and ip-api.

use meteo_proxy::{
    AccuWeatherClient, Coordinates, IpGeolocator, LocationQuery, LocationResolver,
    ResolutionStrategy, UpstreamClient, UpstreamClientConfig,
};
use std::net::IpAddr;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEOPOSITION_PATH: &str = "/locations/v1/cities/geoposition/search";

fn resolver_with(server: &MockServer, config: UpstreamClientConfig) -> LocationResolver {
    let base = Url::parse(&server.uri()).unwrap();
    let http = UpstreamClient::new(config, None).unwrap();
    LocationResolver::new(
        AccuWeatherClient::new(http.clone(), "test-key", base.clone()),
        IpGeolocator::new(http, base),
        "223019",
        "Abidjan, Ivory Coast",
    )
}

fn resolver(server: &MockServer) -> LocationResolver {
    resolver_with(server, UpstreamClientConfig::default())
}

fn public_ip() -> Option<IpAddr> {
    Some("41.66.28.10".parse().unwrap())
}

fn abidjan() -> Coordinates {
    Coordinates::new(5.34, -4.03).unwrap()
}

async fn mount_geoposition(server: &MockServer, q: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(GEOPOSITION_PATH))
        .and(query_param("q", q))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fixed_wins_without_network_calls() {
    let server = MockServer::start().await;
    let query = LocationQuery {
        coordinates: Some(abidjan()),
        fixed: true,
    };

    let resolved = resolver(&server).resolve(&query, public_ip()).await;

    assert_eq!(resolved.provider_location_id, "223019");
    assert_eq!(resolved.label, "Abidjan, Ivory Coast");
    assert_eq!(resolved.strategy, ResolutionStrategy::Fixed);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "fixed resolution must not call out: {requests:?}");
}

#[tokio::test]
async fn test_coordinates_use_reverse_geocoded_key() {
    let server = MockServer::start().await;
    mount_geoposition(
        &server,
        "5.34,-4.03",
        serde_json::json!({
            "Key": "123",
            "LocalizedName": "Abidjan",
            "AdministrativeArea": { "LocalizedName": "Abidjan" },
            "Country": { "LocalizedName": "Ivory Coast" }
        }),
    )
    .await;

    let resolved = resolver(&server)
        .resolve(&LocationQuery::at(abidjan()), public_ip())
        .await;

    assert_eq!(resolved.provider_location_id, "123");
    assert_eq!(resolved.label, "Abidjan, Abidjan, Ivory Coast");
    assert_eq!(resolved.strategy, ResolutionStrategy::Coordinates);
}

#[tokio::test]
async fn test_reverse_geocode_failure_falls_back_to_ip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOPOSITION_PATH))
        .and(query_param("q", "5.34,-4.03"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json/41.66.28.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 7.69,
            "lon": -5.03
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_geoposition(
        &server,
        "7.69,-5.03",
        serde_json::json!({
            "Key": "224000",
            "LocalizedName": "Bouaké",
            "Country": { "LocalizedName": "Ivory Coast" }
        }),
    )
    .await;

    let resolved = resolver(&server)
        .resolve(&LocationQuery::at(abidjan()), public_ip())
        .await;

    assert_eq!(resolved.provider_location_id, "224000");
    assert_eq!(resolved.label, "Bouaké, Ivory Coast");
    assert_eq!(resolved.strategy, ResolutionStrategy::IpGeolocation);
}

#[tokio::test]
async fn test_missing_key_is_a_strategy_failure() {
    let server = MockServer::start().await;
    mount_geoposition(&server, "5.34,-4.03", serde_json::json!({ "LocalizedName": "Nowhere" })).await;

    let resolved = resolver(&server)
        .resolve(&LocationQuery::at(abidjan()), None)
        .await;

    assert_eq!(resolved.provider_location_id, "223019");
    assert_eq!(resolved.strategy, ResolutionStrategy::Default);
}

#[tokio::test]
async fn test_everything_failing_yields_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOPOSITION_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/json/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resolved = resolver(&server)
        .resolve(&LocationQuery::at(abidjan()), public_ip())
        .await;

    assert_eq!(resolved.provider_location_id, "223019");
    assert_eq!(resolved.label, "Abidjan, Ivory Coast");
    assert_eq!(resolved.strategy, ResolutionStrategy::Default);
}

#[tokio::test]
async fn test_ip_located_but_reverse_geocode_fails_yields_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/41.66.28.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 7.69,
            "lon": -5.03
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(GEOPOSITION_PATH))
        .and(query_param("q", "7.69,-5.03"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let resolved = resolver(&server)
        .resolve(&LocationQuery::default(), public_ip())
        .await;

    // Raw IP coordinates are never handed to the weather provider
    assert_eq!(resolved.provider_location_id, "223019");
    assert_eq!(resolved.strategy, ResolutionStrategy::Default);
}

#[tokio::test]
async fn test_private_client_ip_is_not_looked_up() {
    let server = MockServer::start().await;

    Mock::given(path_regex(r"^/json/.*$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let resolved = resolver(&server)
        .resolve(&LocationQuery::default(), Some("192.168.1.15".parse().unwrap()))
        .await;

    assert_eq!(resolved.strategy, ResolutionStrategy::Default);
}

#[tokio::test]
async fn test_slow_reverse_geocode_times_out_and_falls_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOPOSITION_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "Key": "123", "LocalizedName": "Abidjan" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = UpstreamClientConfig {
        request_timeout_seconds: 1,
        connect_timeout_seconds: 1,
        enable_detailed_logging: false,
    };

    let resolved = resolver_with(&server, config)
        .resolve(&LocationQuery::at(abidjan()), None)
        .await;

    assert_eq!(resolved.provider_location_id, "223019");
    assert_eq!(resolved.strategy, ResolutionStrategy::Default);
}
