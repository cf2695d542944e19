//! SmartRent backend integration
//!
//! Async HTTP client for the vehicle-booking backend: nearby search,
//! booking, lock/unlock, trip lifecycle and emergency alerts.
//!
//! # Architecture
//!
//! [`RentalClient`] is the raw interface. Every call returns the backend's
//! JSON body together with its status on 2xx, or a tagged
//! [`RentalApiError`] otherwise. [`RentalClientExt`] layers typed requests
//! and views on top. [`HttpRentalClient`] is the reqwest implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_smartrent::{HttpRentalClient, RentalApiConfig, RentalClientExt};
//! use domain::Coordinate;
//!
//! let client = HttpRentalClient::new(&RentalApiConfig::default())?;
//! let nearby = client.nearby_vehicles(Coordinate::hanoi()).await?;
//! for vehicle in nearby.vehicles {
//!     println!("{} at {:.2} km", vehicle.id, vehicle.distance);
//! }
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{ApiResult, HttpRentalClient, RentalClient, RentalClientExt};
pub use config::RentalApiConfig;
pub use error::RentalApiError;
pub use models::{
    Acknowledgement, AlertReceipt, AlertSeverity, AlertStatus, AlertType, ApiResponse,
    BookingConfirmation, DEFAULT_RADIUS_KM, EmergencyReport, EndTripRequest, FeedbackRequest,
    NearbyQuery, NearbyVehicle, NearbyVehicles, RoutePlan, RouteWarning, StartTripRequest,
    TripSummary, VehicleType,
};
