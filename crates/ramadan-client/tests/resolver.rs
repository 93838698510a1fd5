//! Integration tests for the location waterfall.

use std::time::Duration;

use ramadan_client::{
    ClientError, DevicePosition, IpLocationClient, LocationResolver, PositionSource,
    GPS_PLACEHOLDER_NAME,
};
use ramadan_core::location::{FALLBACK_COORDINATES, FALLBACK_CITY};
use ramadan_core::{
    CalculationSettings, Coordinates, LocationMode, LocationSource, LocationTarget,
};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEVICE: Coordinates = Coordinates {
    latitude: 24.4667,
    longitude: 39.6,
};

/// Never answers within any reasonable deadline.
struct StalledPosition;

impl PositionSource for StalledPosition {
    async fn current_position(&self, _high_accuracy: bool) -> Result<Coordinates, ClientError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(DEVICE)
    }
}

async fn ip_server_ok() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "city": "Amman",
            "country_name": "Jordan",
            "latitude": 31.95,
            "longitude": 35.93
        })))
        .mount(&server)
        .await;
    server
}

async fn ip_server_down() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    server
}

fn ip_client(server: &MockServer) -> IpLocationClient {
    IpLocationClient::with_url(5, &server.uri(), "test-agent")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn manual_settings_skip_the_network() {
    let server = ip_server_down().await;
    let resolver = LocationResolver::new(DevicePosition::Fixed(DEVICE), ip_client(&server), 5);
    let settings = CalculationSettings {
        location_mode: LocationMode::Manual,
        city: "Cairo".to_string(),
        country: "Egypt".to_string(),
        ..CalculationSettings::default()
    };

    let loc = resolver.resolve(&settings).await;

    assert_eq!(loc.source, LocationSource::Manual);
    assert_eq!(loc.name, "Cairo, Egypt");
    assert!(loc.coordinates.is_none());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn manual_mode_with_blank_city_falls_through() {
    let server = ip_server_ok().await;
    let resolver = LocationResolver::new(DevicePosition::Unavailable, ip_client(&server), 5);
    let settings = CalculationSettings {
        location_mode: LocationMode::Manual,
        city: String::new(),
        country: "Egypt".to_string(),
        ..CalculationSettings::default()
    };

    let loc = resolver.resolve(&settings).await;
    assert_eq!(loc.source, LocationSource::Ip);
}

#[tokio::test]
async fn device_position_wins_when_high_precision() {
    let server = ip_server_ok().await;
    let resolver = LocationResolver::new(DevicePosition::Fixed(DEVICE), ip_client(&server), 5);

    let loc = resolver.resolve(&CalculationSettings::default()).await;

    assert_eq!(loc.source, LocationSource::Gps);
    assert_eq!(loc.name, GPS_PLACEHOLDER_NAME);
    assert_eq!(loc.target, LocationTarget::Coordinates(DEVICE));
}

#[tokio::test]
async fn device_position_is_skipped_without_high_precision() {
    let server = ip_server_ok().await;
    let resolver = LocationResolver::new(DevicePosition::Fixed(DEVICE), ip_client(&server), 5);
    let settings = CalculationSettings {
        high_precision: false,
        ..CalculationSettings::default()
    };

    let loc = resolver.resolve(&settings).await;

    assert_eq!(loc.source, LocationSource::Ip);
    assert_eq!(loc.name, "Amman, Jordan");
}

#[tokio::test]
async fn missing_device_position_falls_back_to_ip() {
    let server = ip_server_ok().await;
    let resolver = LocationResolver::new(DevicePosition::Unavailable, ip_client(&server), 5);

    let loc = resolver.resolve(&CalculationSettings::default()).await;

    assert_eq!(loc.source, LocationSource::Ip);
    assert_eq!(
        loc.coordinates,
        Some(Coordinates {
            latitude: 31.95,
            longitude: 35.93
        })
    );
}

#[tokio::test]
async fn stalled_device_position_times_out_to_ip() {
    let server = ip_server_ok().await;
    let resolver = LocationResolver::new(StalledPosition, ip_client(&server), 1);

    let loc = resolver.resolve(&CalculationSettings::default()).await;

    assert_eq!(loc.source, LocationSource::Ip);
}

#[tokio::test]
async fn everything_failing_yields_fallback() {
    let server = ip_server_down().await;
    let resolver = LocationResolver::new(DevicePosition::Unavailable, ip_client(&server), 5);

    let loc = resolver.resolve(&CalculationSettings::default()).await;

    assert_eq!(loc.source, LocationSource::Fallback);
    assert_eq!(loc.coordinates, Some(FALLBACK_COORDINATES));
    assert!(loc.name.starts_with(FALLBACK_CITY));
}
