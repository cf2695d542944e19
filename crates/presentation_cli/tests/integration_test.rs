//! Integration tests for CLI
//!
//! Argument parsing is tested directly on the real `Cli`; command execution
//! runs against a wiremock backend.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;

use clap::Parser;
use domain::{TripId, VehicleId};
use infrastructure::{AppConfig, LocationConfig, SmartRent};
use integration_smartrent::{AlertSeverity, AlertType, VehicleType};
use presentation_cli::{Cli, Commands, execute, log_filter_from_verbosity};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

fn toolkit_for(server: &MockServer) -> SmartRent {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    config.location = LocationConfig::fixed(domain::Coordinate::hanoi());
    SmartRent::headless(&config).unwrap().0
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn cli_parses_nearby_with_defaults() {
    let cli = parse_args(&["smartrent-cli", "nearby", "--lat", "21.0285", "--lng", "105.8542"])
        .unwrap();
    if let Commands::Nearby {
        lat,
        lng,
        radius,
        vehicle_type,
    } = cli.command
    {
        assert_eq!(lat, Some(21.0285));
        assert_eq!(lng, Some(105.8542));
        assert!((radius - 5.0).abs() < f64::EPSILON);
        assert_eq!(vehicle_type, VehicleType::All);
    } else {
        panic!("Expected Nearby command");
    }
}

#[test]
fn cli_parses_nearby_with_type_and_radius() {
    let cli = parse_args(&["smartrent-cli", "nearby", "-t", "bike", "-r", "2"]).unwrap();
    if let Commands::Nearby {
        lat,
        vehicle_type,
        radius,
        ..
    } = cli.command
    {
        assert_eq!(lat, None);
        assert_eq!(vehicle_type, VehicleType::Bike);
        assert!((radius - 2.0).abs() < f64::EPSILON);
    } else {
        panic!("Expected Nearby command");
    }
}

#[test]
fn cli_rejects_unknown_vehicle_type() {
    assert!(parse_args(&["smartrent-cli", "nearby", "--type", "boat"]).is_err());
}

#[test]
fn cli_requires_both_coordinates() {
    assert!(parse_args(&["smartrent-cli", "nearby", "--lat", "21.0"]).is_err());
}

#[test]
fn cli_parses_book_with_global_flags() {
    let cli = parse_args(&[
        "smartrent-cli",
        "-vv",
        "book",
        "42",
        "--url",
        "http://rent.local:5000",
    ])
    .unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.url.as_deref(), Some("http://rent.local:5000"));
    if let Commands::Book { vehicle_id } = cli.command {
        assert_eq!(vehicle_id, VehicleId::new(42));
    } else {
        panic!("Expected Book command");
    }
}

#[test]
fn cli_rejects_non_numeric_id() {
    assert!(parse_args(&["smartrent-cli", "unlock", "abc"]).is_err());
}

#[test]
fn cli_parses_end_trip_payload() {
    let cli = parse_args(&[
        "smartrent-cli",
        "end-trip",
        "7",
        "--payload",
        r#"{"latitude": 1.0, "longitude": 2.0}"#,
    ])
    .unwrap();
    if let Commands::EndTrip {
        trip_id, payload, ..
    } = cli.command
    {
        assert_eq!(trip_id, TripId::new(7));
        assert_eq!(payload, Some(json!({"latitude": 1.0, "longitude": 2.0})));
    } else {
        panic!("Expected EndTrip command");
    }
}

#[test]
fn cli_end_trip_payload_conflicts_with_fields() {
    let result = parse_args(&[
        "smartrent-cli",
        "end-trip",
        "7",
        "--payload",
        "{}",
        "--distance",
        "3",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_emergency() {
    let cli = parse_args(&[
        "smartrent-cli",
        "emergency",
        "--type",
        "theft",
        "--severity",
        "critical",
        "--vehicle",
        "9",
    ])
    .unwrap();
    if let Commands::Emergency {
        alert_type,
        severity,
        vehicle,
        ..
    } = cli.command
    {
        assert_eq!(alert_type, Some(AlertType::Theft));
        assert_eq!(severity, AlertSeverity::Critical);
        assert_eq!(vehicle, Some(VehicleId::new(9)));
    } else {
        panic!("Expected Emergency command");
    }
}

#[test]
fn cli_emergency_needs_type_or_payload() {
    assert!(parse_args(&["smartrent-cli", "emergency"]).is_err());
}

#[test]
fn cli_parses_negative_distance_arguments() {
    let cli = parse_args(&["smartrent-cli", "distance", "-33.86", "151.2", "51.5", "-0.12"])
        .unwrap();
    assert!(matches!(cli.command, Commands::Distance { .. }));
}

#[test]
fn cli_parses_config_path() {
    let cli = parse_args(&["smartrent-cli", "locate", "--config", "/etc/smartrent.toml"]).unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/smartrent.toml"))
    );
}

#[test]
fn verbosity_mapping() {
    assert_eq!(log_filter_from_verbosity(0), "warn");
    assert_eq!(log_filter_from_verbosity(1), "info");
    assert_eq!(log_filter_from_verbosity(2), "debug");
    assert_eq!(log_filter_from_verbosity(9), "trace");
}

// ============================================================================
// Execution
// ============================================================================

#[tokio::test]
async fn nearby_without_coordinates_uses_device_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vehicles/api/nearby"))
        .and(query_param("radius", "5"))
        .and(query_param("type", "all"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"vehicles": [], "count": 0})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let toolkit = toolkit_for(&server);
    let cli = parse_args(&["smartrent-cli", "nearby"]).unwrap();
    let output = execute(&toolkit, cli.command).await.unwrap();

    assert_eq!(output.status, Some(200));
    assert_eq!(output.body["count"], 0);
    assert!(!output.is_failure());
}

#[tokio::test]
async fn backend_error_status_is_reported_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vehicles/3/book"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "Vehicle not available"})),
        )
        .mount(&server)
        .await;

    let toolkit = toolkit_for(&server);
    let cli = parse_args(&["smartrent-cli", "book", "3"]).unwrap();
    let output = execute(&toolkit, cli.command).await.unwrap();

    assert_eq!(output.status, Some(409));
    assert!(output.is_failure());
    assert!(output.render().unwrap().contains("Vehicle not available"));
}

#[tokio::test]
async fn end_trip_builds_payload_from_flags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trips/4/end"))
        .and(body_json(json!({
            "latitude": 10.5,
            "longitude": 106.5,
            "address": "Bến Thành",
            "distance": 2.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let toolkit = toolkit_for(&server);
    let cli = parse_args(&[
        "smartrent-cli",
        "end-trip",
        "4",
        "--lat",
        "10.5",
        "--lng",
        "106.5",
        "--address",
        "Bến Thành",
        "--distance",
        "2",
    ])
    .unwrap();
    let output = execute(&toolkit, cli.command).await.unwrap();
    assert_eq!(output.status, Some(200));
}

#[tokio::test]
async fn invalid_rating_fails_before_request() {
    let server = MockServer::start().await;
    let toolkit = toolkit_for(&server);
    let cli = parse_args(&["smartrent-cli", "feedback", "1", "--rating", "7"]).unwrap();
    assert!(execute(&toolkit, cli.command).await.is_err());
}

#[tokio::test]
async fn local_commands_need_no_backend() {
    let server = MockServer::start().await;
    let toolkit = toolkit_for(&server);

    let cli = parse_args(&["smartrent-cli", "format-currency", "1234567"]).unwrap();
    let output = execute(&toolkit, cli.command).await.unwrap();
    assert_eq!(output.status, None);
    assert_eq!(output.body, json!("1.234.567\u{a0}₫"));

    let cli = parse_args(&["smartrent-cli", "format-date", "2024-01-05"]).unwrap();
    let output = execute(&toolkit, cli.command).await.unwrap();
    assert_eq!(output.body, json!("5/1/2024"));

    let cli = parse_args(&[
        "smartrent-cli",
        "distance",
        "21.0285",
        "105.8542",
        "10.8231",
        "106.6297",
    ])
    .unwrap();
    let output = execute(&toolkit, cli.command).await.unwrap();
    let km = output.body["distance_km"].as_f64().unwrap();
    assert!((1130.0..=1160.0).contains(&km));

    let cli = parse_args(&["smartrent-cli", "locate"]).unwrap();
    let output = execute(&toolkit, cli.command).await.unwrap();
    assert_eq!(output.body["latitude"], json!(21.0285));
}
