//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::{AlertId, BookingId, TripId, VehicleId};
use integration_smartrent::{AlertSeverity, AlertType, DEFAULT_RADIUS_KM, VehicleType};
use serde_json::Value;

/// SmartRent CLI
#[derive(Debug, Parser)]
#[command(name = "smartrent-cli")]
#[command(author, version, about = "SmartRent vehicle rental CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./smartrent.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides the configuration
    #[arg(short, long, global = true, env = "SMARTRENT_URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find vehicles near a point
    ///
    /// Without --lat/--lng the configured device location is used.
    #[command(allow_negative_numbers = true)]
    Nearby {
        /// Latitude of the search center
        #[arg(long, requires = "lng")]
        lat: Option<f64>,

        /// Longitude of the search center
        #[arg(long, requires = "lat")]
        lng: Option<f64>,

        /// Search radius in kilometers
        #[arg(short, long, default_value_t = DEFAULT_RADIUS_KM)]
        radius: f64,

        /// Vehicle type: all, bike, motorbike or car
        #[arg(short = 't', long = "type", default_value = "all")]
        vehicle_type: VehicleType,
    },

    /// Book a vehicle
    Book {
        /// Vehicle id
        vehicle_id: VehicleId,
    },

    /// Unlock a vehicle
    Unlock {
        /// Vehicle id
        vehicle_id: VehicleId,
    },

    /// Lock a vehicle
    Lock {
        /// Vehicle id
        vehicle_id: VehicleId,
    },

    /// Start the trip of a booking
    #[command(allow_negative_numbers = true)]
    StartTrip {
        /// Booking id
        booking_id: BookingId,

        /// Pickup latitude (default: device location)
        #[arg(long, requires = "lng")]
        lat: Option<f64>,

        /// Pickup longitude (default: device location)
        #[arg(long, requires = "lat")]
        lng: Option<f64>,

        /// Pickup address
        #[arg(long)]
        address: Option<String>,
    },

    /// End a trip
    ///
    /// Either pass --payload with the raw JSON body, or the drop-off fields.
    #[command(allow_negative_numbers = true)]
    EndTrip {
        /// Trip id
        trip_id: TripId,

        /// Drop-off latitude (default: device location)
        #[arg(long, requires = "lng", conflicts_with = "payload")]
        lat: Option<f64>,

        /// Drop-off longitude (default: device location)
        #[arg(long, requires = "lat", conflicts_with = "payload")]
        lng: Option<f64>,

        /// Drop-off address
        #[arg(long, conflicts_with = "payload")]
        address: Option<String>,

        /// Distance ridden in kilometers
        #[arg(long, default_value_t = 0.0, conflicts_with = "payload")]
        distance: f64,

        /// Raw JSON body sent as-is
        #[arg(long)]
        payload: Option<Value>,
    },

    /// Rate a finished trip
    Feedback {
        /// Trip id
        trip_id: TripId,

        /// Stars, 1 to 5
        #[arg(short, long)]
        rating: u8,

        /// Free-text comment
        #[arg(short = 'm', long)]
        comment: Option<String>,
    },

    /// Suggest a route between two points
    #[command(allow_negative_numbers = true)]
    Route {
        /// Start latitude
        #[arg(long)]
        from_lat: f64,

        /// Start longitude
        #[arg(long)]
        from_lng: f64,

        /// End latitude
        #[arg(long)]
        to_lat: f64,

        /// End longitude
        #[arg(long)]
        to_lng: f64,
    },

    /// Report an emergency
    ///
    /// Either pass --payload with the raw JSON body, or the report fields.
    #[command(allow_negative_numbers = true)]
    Emergency {
        /// Kind: accident, breakdown, theft, medical or emergency
        #[arg(short = 't', long = "type", required_unless_present = "payload")]
        alert_type: Option<AlertType>,

        /// Urgency: low, medium, high or critical
        #[arg(short, long, default_value = "medium")]
        severity: AlertSeverity,

        /// Vehicle involved
        #[arg(long)]
        vehicle: Option<VehicleId>,

        /// Trip in progress
        #[arg(long)]
        trip: Option<TripId>,

        /// What happened
        #[arg(short, long)]
        description: Option<String>,

        /// Latitude of the incident
        #[arg(long, requires = "lng")]
        lat: Option<f64>,

        /// Longitude of the incident
        #[arg(long, requires = "lat")]
        lng: Option<f64>,

        /// Address of the incident
        #[arg(long)]
        address: Option<String>,

        /// Raw JSON body sent as-is
        #[arg(long, conflicts_with = "alert_type")]
        payload: Option<Value>,
    },

    /// Press the emergency button of a vehicle
    Sos {
        /// Vehicle id
        vehicle_id: VehicleId,
    },

    /// Look up the state of an emergency alert
    AlertStatus {
        /// Alert id
        alert_id: AlertId,
    },

    /// Great-circle distance between two points in kilometers
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },

    /// Render an amount in the configured currency
    #[command(allow_negative_numbers = true)]
    FormatCurrency {
        amount: f64,
    },

    /// Render a date in the configured locale
    ///
    /// Accepts RFC 3339, YYYY-MM-DD, "YYYY-MM-DD HH:MM:SS" or epoch milliseconds.
    #[command(allow_negative_numbers = true)]
    FormatDate {
        value: String,
    },

    /// Print the current device location
    Locate,
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
