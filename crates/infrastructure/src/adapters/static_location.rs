//! Fixed location service - Implements `LocationServicePort` from config
//!
//! Answers every query immediately with the same fix or the same failure.

use application::ports::{
    LocationServicePort, Position, PositionCallback, PositionError, PositionErrorCallback,
    PositionErrorCode,
};
use chrono::Utc;
use domain::Coordinate;
use tracing::debug;

use crate::config::LocationConfig;

#[derive(Debug, Clone)]
enum Outcome {
    Fix {
        coordinate: Coordinate,
        accuracy_m: Option<f64>,
    },
    Failure(PositionError),
}

/// Location service that always reports the same result
#[derive(Debug, Clone)]
pub struct StaticLocationService {
    outcome: Outcome,
}

impl StaticLocationService {
    /// Always report `coordinate`
    #[must_use]
    pub const fn fixed(coordinate: Coordinate, accuracy_m: Option<f64>) -> Self {
        Self {
            outcome: Outcome::Fix {
                coordinate,
                accuracy_m,
            },
        }
    }

    /// Always fail with `error`
    #[must_use]
    pub const fn failing(error: PositionError) -> Self {
        Self {
            outcome: Outcome::Failure(error),
        }
    }

    /// Always fail as if the user refused access
    #[must_use]
    pub fn denied() -> Self {
        Self::failing(PositionError::new(
            PositionErrorCode::PermissionDenied,
            "User denied Geolocation",
        ))
    }

    /// Service for the configured location, if one is set
    #[must_use]
    pub fn from_config(config: &LocationConfig) -> Option<Self> {
        config
            .coordinate()
            .map(|coordinate| Self::fixed(coordinate, config.accuracy_m))
    }
}

impl LocationServicePort for StaticLocationService {
    fn get_current_position(&self, on_success: PositionCallback, on_error: PositionErrorCallback) {
        match &self.outcome {
            Outcome::Fix {
                coordinate,
                accuracy_m,
            } => {
                debug!(%coordinate, "Reporting fixed position");
                on_success(Position {
                    latitude: coordinate.latitude(),
                    longitude: coordinate.longitude(),
                    accuracy_m: *accuracy_m,
                    timestamp: Utc::now(),
                });
            },
            Outcome::Failure(error) => {
                debug!(%error, "Reporting position failure");
                on_error(error.clone());
            },
        }
    }
}
