//! Request payloads and response views of the rental backend
//!
//! Every endpoint answers with loosely shaped JSON. The client hands the
//! body back verbatim in [`ApiResponse`]; the typed views below are opt-in
//! through [`ApiResponse::decode`].

use std::fmt;
use std::str::FromStr;

use domain::value_objects::{Coordinate, TripId, VehicleId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RentalApiError;

/// Default nearby-search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// A successful (2xx) backend response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body, untouched
    pub body: Value,
}

impl ApiResponse {
    /// Decode the body into a typed view
    ///
    /// # Errors
    ///
    /// `InvalidBody` if the body does not have the expected shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RentalApiError> {
        T::deserialize(&self.body).map_err(|e| RentalApiError::InvalidBody {
            status: self.status,
            message: e.to_string(),
        })
    }
}

// --- Request side ---

/// Vehicle category filter of the nearby search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// No filtering
    #[default]
    All,
    /// Bicycles
    Bike,
    /// Motorbikes and scooters
    Motorbike,
    /// Cars
    Car,
}

impl VehicleType {
    /// Query-string value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Bike => "bike",
            Self::Motorbike => "motorbike",
            Self::Car => "car",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "bike" => Ok(Self::Bike),
            "motorbike" => Ok(Self::Motorbike),
            "car" => Ok(Self::Car),
            other => Err(format!(
                "Invalid vehicle type: {other}. Use all, bike, motorbike or car"
            )),
        }
    }
}

/// Parameters of a nearby-vehicle search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    /// Search center latitude
    pub latitude: f64,
    /// Search center longitude
    pub longitude: f64,
    /// Search radius in kilometers
    pub radius_km: f64,
    /// Category filter
    pub vehicle_type: VehicleType,
}

impl NearbyQuery {
    /// Search around a point with the default radius and no type filter
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: DEFAULT_RADIUS_KM,
            vehicle_type: VehicleType::All,
        }
    }

    /// Search around a coordinate
    #[must_use]
    pub const fn around(center: Coordinate) -> Self {
        Self::new(center.latitude(), center.longitude())
    }

    /// Override the radius
    #[must_use]
    pub const fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Restrict to one vehicle category
    #[must_use]
    pub const fn with_type(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = vehicle_type;
        self
    }

    pub(crate) fn query_params(&self) -> [(&'static str, String); 4] {
        [
            ("lat", self.latitude.to_string()),
            ("lng", self.longitude.to_string()),
            ("radius", self.radius_km.to_string()),
            ("type", self.vehicle_type.to_string()),
        ]
    }
}

/// Body of a trip start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartTripRequest {
    /// Pickup latitude
    pub latitude: f64,
    /// Pickup longitude
    pub longitude: f64,
    /// Human-readable pickup address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl StartTripRequest {
    /// Start at a coordinate
    #[must_use]
    pub const fn at(location: Coordinate) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
            address: None,
        }
    }

    /// Attach an address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Body of a trip end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndTripRequest {
    /// Drop-off latitude
    pub latitude: f64,
    /// Drop-off longitude
    pub longitude: f64,
    /// Human-readable drop-off address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Distance ridden in kilometers
    #[serde(default)]
    pub distance: f64,
}

impl EndTripRequest {
    /// End at a coordinate after riding `distance_km`
    #[must_use]
    pub const fn at(location: Coordinate, distance_km: f64) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
            address: None,
            distance: distance_km,
        }
    }

    /// Attach an address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Body of a trip rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// Stars, 1 to 5
    pub rating: u8,
    /// Free-text comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl FeedbackRequest {
    /// Create a rating
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if `rating` is not between 1 and 5.
    pub fn new(rating: u8, feedback: Option<String>) -> Result<Self, RentalApiError> {
        if !(1..=5).contains(&rating) {
            return Err(RentalApiError::InvalidRequest(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }
        Ok(Self { rating, feedback })
    }
}

/// Kind of emergency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Collision or fall
    Accident,
    /// The vehicle stopped working
    Breakdown,
    /// The vehicle was stolen
    Theft,
    /// The rider needs medical help
    Medical,
    /// Unspecified SOS
    Emergency,
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accident" => Ok(Self::Accident),
            "breakdown" => Ok(Self::Breakdown),
            "theft" => Ok(Self::Theft),
            "medical" => Ok(Self::Medical),
            "emergency" | "sos" => Ok(Self::Emergency),
            other => Err(format!(
                "Invalid alert type: {other}. Use accident, breakdown, theft, medical or emergency"
            )),
        }
    }
}

/// Urgency of an emergency report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Can wait
    Low,
    /// Default urgency
    #[default]
    Medium,
    /// Needs quick response
    High,
    /// Life or property at risk
    Critical,
}

impl FromStr for AlertSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!(
                "Invalid alert severity: {other}. Use low, medium, high or critical"
            )),
        }
    }
}

/// Body of an emergency report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyReport {
    /// Vehicle involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<VehicleId>,
    /// Trip in progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<TripId>,
    /// Kind of emergency
    pub alert_type: AlertType,
    /// Urgency
    #[serde(default)]
    pub severity: AlertSeverity,
    /// What happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Where it happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Where it happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Human-readable address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl EmergencyReport {
    /// A report of the given kind with default severity
    #[must_use]
    pub fn new(alert_type: AlertType) -> Self {
        Self {
            vehicle_id: None,
            trip_id: None,
            alert_type,
            severity: AlertSeverity::default(),
            description: None,
            latitude: None,
            longitude: None,
            address: None,
        }
    }

    /// Set the vehicle involved
    #[must_use]
    pub const fn with_vehicle(mut self, vehicle_id: VehicleId) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    /// Set the trip in progress
    #[must_use]
    pub const fn with_trip(mut self, trip_id: TripId) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    /// Set the urgency
    #[must_use]
    pub const fn with_severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Describe what happened
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set where it happened
    #[must_use]
    pub const fn at(mut self, location: Coordinate) -> Self {
        self.latitude = Some(location.latitude());
        self.longitude = Some(location.longitude());
        self
    }
}

// --- Response views ---

/// Body of a nearby search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyVehicles {
    /// Matches, nearest first
    pub vehicles: Vec<NearbyVehicle>,
    /// Number of matches
    pub count: usize,
}

/// A vehicle within the search radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyVehicle {
    pub id: VehicleId,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "type", default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the search center in kilometers
    pub distance: f64,
    /// Battery level in percent
    #[serde(default)]
    pub battery: Option<f64>,
    #[serde(default)]
    pub price_per_minute: Option<f64>,
    #[serde(default)]
    pub qr_code: Option<String>,
}

impl NearbyVehicle {
    /// Vehicle position
    #[must_use]
    pub const fn location(&self) -> Coordinate {
        Coordinate::new_unchecked(self.latitude, self.longitude)
    }
}

/// Answer to a booking or a trip start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub trip_id: TripId,
    pub trip_code: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Plain acknowledgement (`{"success": true, "message": ...}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Billing summary of a finished trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub trip_code: String,
    pub duration_minutes: f64,
    pub distance_km: f64,
    pub total_cost: f64,
    pub payment_code: String,
}

/// Answer to an emergency report or SOS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertReceipt {
    pub alert_code: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Processing state of an emergency alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertStatus {
    pub alert_code: String,
    pub status: String,
    #[serde(default)]
    pub response_team: Option<String>,
    #[serde(default)]
    pub response_time: Option<String>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

/// Suggested route between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub distance_km: f64,
    pub duration_minutes: f64,
    /// `[lat, lng]` pairs
    #[serde(default)]
    pub polyline: Vec<[f64; 2]>,
    #[serde(default)]
    pub warnings: Vec<RouteWarning>,
}

/// Hazard or restriction along a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteWarning {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}
