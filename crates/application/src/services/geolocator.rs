//! User location lookup
//!
//! Turns the platform's callback-style position query into a single-shot
//! future. No retries: a failed query is reported once and the caller
//! decides whether to ask again.

use std::sync::Arc;

use domain::value_objects::Coordinate;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, instrument, warn};

use crate::error::GeolocationError;
use crate::ports::{LocationServicePort, Position, PositionError};

type PositionResult = Result<Position, PositionError>;

/// Resolves the user's current coordinate
#[derive(Clone, Default)]
pub struct Geolocator {
    service: Option<Arc<dyn LocationServicePort>>,
}

impl std::fmt::Debug for Geolocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geolocator")
            .field("supported", &self.is_supported())
            .finish()
    }
}

impl Geolocator {
    /// Geolocator backed by a platform location service
    #[must_use]
    pub fn new(service: Arc<dyn LocationServicePort>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// Geolocator on a platform without location capability
    #[must_use]
    pub fn unsupported() -> Self {
        Self { service: None }
    }

    /// Whether a location service is present
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.service.is_some()
    }

    /// Query the current user location once
    ///
    /// # Errors
    ///
    /// `LocationUnavailable` when there is no location service, otherwise
    /// the platform-reported failure.
    #[instrument(skip(self))]
    pub async fn get_user_location(&self) -> Result<Coordinate, GeolocationError> {
        let Some(service) = &self.service else {
            warn!("Location requested on a platform without geolocation");
            return Err(GeolocationError::LocationUnavailable);
        };

        let (tx, rx) = oneshot::channel::<PositionResult>();
        // Whichever callback runs first consumes the sender
        let sender = Arc::new(Mutex::new(Some(tx)));
        let on_error_sender = Arc::clone(&sender);

        service.get_current_position(
            Box::new(move |position| {
                if let Some(tx) = sender.lock().take() {
                    let _ = tx.send(Ok(position));
                }
            }),
            Box::new(move |error| {
                if let Some(tx) = on_error_sender.lock().take() {
                    let _ = tx.send(Err(error));
                }
            }),
        );

        match rx.await {
            Ok(Ok(position)) => {
                debug!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    "Location resolved"
                );
                Ok(Coordinate::new_unchecked(
                    position.latitude,
                    position.longitude,
                ))
            },
            Ok(Err(error)) => {
                warn!(%error, "Location query failed");
                Err(error.into())
            },
            Err(_) => Err(GeolocationError::PositionUnavailable(
                "location service dropped the request without answering".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PositionCallback, PositionErrorCallback, PositionErrorCode};
    use chrono::Utc;

    enum Script {
        Fix(f64, f64),
        Fail(PositionErrorCode),
        Silent,
        Both(f64, f64),
    }

    struct ScriptedService(Script);

    impl LocationServicePort for ScriptedService {
        fn get_current_position(
            &self,
            on_success: PositionCallback,
            on_error: PositionErrorCallback,
        ) {
            let fix = |latitude, longitude| Position {
                latitude,
                longitude,
                accuracy_m: Some(12.0),
                timestamp: Utc::now(),
            };
            match self.0 {
                Script::Fix(lat, lng) => {
                    // Answer from another task, as a real platform would
                    tokio::spawn(async move { on_success(fix(lat, lng)) });
                },
                Script::Fail(code) => on_error(PositionError::new(code, "scripted")),
                Script::Silent => {},
                Script::Both(lat, lng) => {
                    on_success(fix(lat, lng));
                    on_error(PositionError::new(PositionErrorCode::Timeout, "late"));
                },
            }
        }
    }

    fn geolocator(script: Script) -> Geolocator {
        Geolocator::new(Arc::new(ScriptedService(script)))
    }

    #[tokio::test]
    async fn resolves_with_reported_coordinates() {
        let loc = geolocator(Script::Fix(21.0285, 105.8542))
            .get_user_location()
            .await
            .unwrap();
        assert_eq!(loc, Coordinate::new_unchecked(21.0285, 105.8542));
    }

    #[tokio::test]
    async fn unsupported_platform_is_location_unavailable() {
        let result = Geolocator::unsupported().get_user_location().await;
        assert_eq!(result, Err(GeolocationError::LocationUnavailable));
        assert!(!Geolocator::default().is_supported());
    }

    #[tokio::test]
    async fn platform_error_is_propagated() {
        let result = geolocator(Script::Fail(PositionErrorCode::PermissionDenied))
            .get_user_location()
            .await;
        assert_eq!(
            result,
            Err(GeolocationError::PermissionDenied("scripted".to_string()))
        );
    }

    #[tokio::test]
    async fn dropped_callbacks_do_not_hang() {
        let result = geolocator(Script::Silent).get_user_location().await;
        assert!(matches!(
            result,
            Err(GeolocationError::PositionUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn only_first_answer_counts() {
        let loc = geolocator(Script::Both(1.0, 2.0))
            .get_user_location()
            .await
            .unwrap();
        assert_eq!(loc, Coordinate::new_unchecked(1.0, 2.0));
    }

    #[test]
    fn synchronous_answer_resolves_without_tokio_test_macro() {
        let result = tokio_test::block_on(
            geolocator(Script::Fail(PositionErrorCode::Timeout)).get_user_location(),
        );
        assert_eq!(result, Err(GeolocationError::Timeout("scripted".to_string())));
    }
}
