//! Application-level errors

use thiserror::Error;

use crate::ports::{PositionError, PositionErrorCode};

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The page has no notification container
    #[error("Notification container not found on page")]
    ContainerMissing,

    /// Timers need a running async runtime
    #[error("No async runtime available to schedule timers")]
    SchedulerUnavailable,

    /// Location query failed
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

/// Failure of a single user-location query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The platform has no location capability at all
    #[error("Geolocation not supported")]
    LocationUnavailable,

    /// Access to location was refused
    #[error("Location permission denied: {0}")]
    PermissionDenied(String),

    /// The platform could not determine a position
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// The platform gave up waiting for a fix
    #[error("Location request timed out: {0}")]
    Timeout(String),
}

impl From<PositionError> for GeolocationError {
    fn from(err: PositionError) -> Self {
        match err.code {
            PositionErrorCode::PermissionDenied => Self::PermissionDenied(err.message),
            PositionErrorCode::PositionUnavailable => Self::PositionUnavailable(err.message),
            PositionErrorCode::Timeout => Self::Timeout(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_errors_map_by_code() {
        let err = PositionError::new(PositionErrorCode::PermissionDenied, "User denied");
        assert_eq!(
            GeolocationError::from(err),
            GeolocationError::PermissionDenied("User denied".to_string())
        );

        let err = PositionError::new(PositionErrorCode::Timeout, "10s");
        assert_eq!(
            GeolocationError::from(err),
            GeolocationError::Timeout("10s".to_string())
        );
    }

    #[test]
    fn unsupported_message() {
        assert_eq!(
            GeolocationError::LocationUnavailable.to_string(),
            "Geolocation not supported"
        );
    }

    #[test]
    fn page_errors_describe_the_missing_piece() {
        assert_eq!(
            ApplicationError::ContainerMissing.to_string(),
            "Notification container not found on page"
        );
        assert_eq!(
            ApplicationError::SchedulerUnavailable.to_string(),
            "No async runtime available to schedule timers"
        );
    }

    #[test]
    fn geolocation_error_is_transparent() {
        let err = ApplicationError::from(GeolocationError::LocationUnavailable);
        assert_eq!(err.to_string(), "Geolocation not supported");
    }
}
