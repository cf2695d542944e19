//! Command execution.

use anyhow::{Context, bail};
use domain::{Coordinate, DateLike};
use infrastructure::SmartRent;
use integration_smartrent::{
    ApiResult, EmergencyReport, EndTripRequest, FeedbackRequest, NearbyQuery, RentalApiError,
    StartTripRequest,
};
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::Commands;

/// Result of one command, ready to print
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// HTTP status for backend calls, `None` for local commands
    pub status: Option<u16>,
    /// Response body or local result
    pub body: Value,
}

impl CommandOutput {
    fn local(body: Value) -> Self {
        Self { status: None, body }
    }

    /// Keep the backend's answer, successful or not
    ///
    /// Non-2xx responses become output with their status; failures without
    /// a response are errors.
    fn from_api(result: ApiResult) -> anyhow::Result<Self> {
        match result {
            Ok(response) => Ok(Self {
                status: Some(response.status),
                body: response.body,
            }),
            Err(RentalApiError::Http { status, body }) => Ok(Self {
                status: Some(status),
                body,
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Whether the backend answered with a non-2xx status
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status.is_some_and(|status| !(200..300).contains(&status))
    }

    /// Human-readable rendering: status line (if any) and pretty JSON
    pub fn render(&self) -> anyhow::Result<String> {
        let body = match &self.body {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other)?,
        };
        Ok(match self.status {
            Some(status) => format!("HTTP {status}\n{body}"),
            None => body,
        })
    }
}

/// Explicit coordinate if given, the device location otherwise
async fn resolve_location(
    toolkit: &SmartRent,
    lat: Option<f64>,
    lng: Option<f64>,
) -> anyhow::Result<Coordinate> {
    if let (Some(lat), Some(lng)) = (lat, lng) {
        return Ok(Coordinate::new(lat, lng)?);
    }
    debug!("No coordinate given, asking the location service");
    toolkit
        .get_user_location()
        .await
        .context("No --lat/--lng given and the device location is unavailable")
}

fn parse_date(value: &str) -> DateLike {
    value
        .trim()
        .parse::<i64>()
        .map_or_else(|_| DateLike::from(value), DateLike::from)
}

/// Run one command against the toolkit
///
/// # Errors
///
/// Returns an error for invalid input or when the backend could not be
/// reached. A backend answering with an error status is not an error here;
/// see [`CommandOutput::is_failure`].
#[allow(clippy::too_many_lines)]
pub async fn execute(toolkit: &SmartRent, command: Commands) -> anyhow::Result<CommandOutput> {
    let api = toolkit.api();

    let result = match command {
        Commands::Nearby {
            lat,
            lng,
            radius,
            vehicle_type,
        } => {
            let center = resolve_location(toolkit, lat, lng).await?;
            let query = NearbyQuery::around(center)
                .with_radius(radius)
                .with_type(vehicle_type);
            api.get_nearby_vehicles(&query).await
        },
        Commands::Book { vehicle_id } => api.book_vehicle(vehicle_id).await,
        Commands::Unlock { vehicle_id } => api.unlock_vehicle(vehicle_id).await,
        Commands::Lock { vehicle_id } => api.lock_vehicle(vehicle_id).await,
        Commands::StartTrip {
            booking_id,
            lat,
            lng,
            address,
        } => {
            let mut request = StartTripRequest::at(resolve_location(toolkit, lat, lng).await?);
            request.address = address;
            api.start_trip(booking_id, &serde_json::to_value(&request)?)
                .await
        },
        Commands::EndTrip {
            trip_id,
            lat,
            lng,
            address,
            distance,
            payload,
        } => {
            let payload = match payload {
                Some(payload) => payload,
                None => {
                    let location = resolve_location(toolkit, lat, lng).await?;
                    let mut request = EndTripRequest::at(location, distance);
                    request.address = address;
                    serde_json::to_value(&request)?
                },
            };
            api.end_trip(trip_id, &payload).await
        },
        Commands::Feedback {
            trip_id,
            rating,
            comment,
        } => {
            let feedback = FeedbackRequest::new(rating, comment)?;
            api.submit_trip_feedback(trip_id, &serde_json::to_value(&feedback)?)
                .await
        },
        Commands::Route {
            from_lat,
            from_lng,
            to_lat,
            to_lng,
        } => {
            let start = Coordinate::new(from_lat, from_lng)?;
            let end = Coordinate::new(to_lat, to_lng)?;
            api.plan_route(start, end).await
        },
        Commands::Emergency {
            alert_type,
            severity,
            vehicle,
            trip,
            description,
            lat,
            lng,
            address,
            payload,
        } => {
            let payload = match (payload, alert_type) {
                (Some(payload), _) => payload,
                (None, Some(alert_type)) => {
                    let mut report = EmergencyReport::new(alert_type).with_severity(severity);
                    report.vehicle_id = vehicle;
                    report.trip_id = trip;
                    report.description = description;
                    report.address = address;
                    if let (Some(lat), Some(lng)) = (lat, lng) {
                        report = report.at(Coordinate::new(lat, lng)?);
                    }
                    serde_json::to_value(&report)?
                },
                (None, None) => bail!("Either --type or --payload is required"),
            };
            api.report_emergency(&payload).await
        },
        Commands::Sos { vehicle_id } => api.press_emergency_button(vehicle_id).await,
        Commands::AlertStatus { alert_id } => api.get_alert_status(alert_id).await,
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            let km = toolkit.calculate_distance(lat1, lon1, lat2, lon2);
            return Ok(CommandOutput::local(json!({ "distance_km": km })));
        },
        Commands::FormatCurrency { amount } => {
            return Ok(CommandOutput::local(Value::String(
                toolkit.format_currency(amount),
            )));
        },
        Commands::FormatDate { value } => {
            return Ok(CommandOutput::local(Value::String(
                toolkit.format_date(parse_date(&value)),
            )));
        },
        Commands::Locate => {
            let location = toolkit
                .get_user_location()
                .await
                .context("Device location is unavailable")?;
            return Ok(CommandOutput::local(json!({
                "latitude": location.latitude(),
                "longitude": location.longitude(),
            })));
        },
    };

    CommandOutput::from_api(result)
}
