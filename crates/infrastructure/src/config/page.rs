//! Page-facing settings: notifications, formatting, device location.

use std::time::Duration;

use application::services::{DEFAULT_DISMISS_AFTER_MS, NotifierConfig};
use domain::{Coordinate, Formatter, LocalePreset};
use serde::{Deserialize, Serialize};

/// Largest accepted UTC offset magnitude, in minutes
const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60 - 1;

// ==============================
// Notifications
// ==============================

/// Notification banner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Time a notification stays on the page, in milliseconds
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

const fn default_dismiss_after_ms() -> u64 {
    DEFAULT_DISMISS_AFTER_MS
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}

impl NotificationsConfig {
    /// Settings for the notifier and page initialisation
    #[must_use]
    pub const fn notifier_config(&self) -> NotifierConfig {
        NotifierConfig {
            dismiss_after: Duration::from_millis(self.dismiss_after_ms),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.dismiss_after_ms == 0 {
            return Err("dismiss_after_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

// ==============================
// Formatting
// ==============================

/// Currency and date formatting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Display locale (`vi-VN` or `en-US`)
    #[serde(default)]
    pub locale: LocalePreset,

    /// UTC offset for dates, in minutes
    ///
    /// Defaults to the locale's own offset (+07:00 for `vi-VN`).
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl FormatConfig {
    /// Build the configured formatter
    #[must_use]
    pub fn formatter(&self) -> Formatter {
        match self.utc_offset_minutes {
            Some(minutes) => Formatter::with_offset(self.locale, minutes),
            None => Formatter::for_locale(self.locale),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        match self.utc_offset_minutes {
            Some(minutes) if minutes.abs() > MAX_UTC_OFFSET_MINUTES => Err(format!(
                "utc_offset_minutes must be within ±{MAX_UTC_OFFSET_MINUTES}, got {minutes}"
            )),
            _ => Ok(()),
        }
    }
}

// ==============================
// Location
// ==============================

/// Fixed device location for headless use
///
/// Configured as `latitude`/`longitude`. Without them the geolocator
/// reports that location is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude (-90.0 to 90.0)
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude (-180.0 to 180.0)
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Reported horizontal accuracy in meters
    #[serde(default)]
    pub accuracy_m: Option<f64>,
}

impl LocationConfig {
    /// A location config pinned to a coordinate
    #[must_use]
    pub const fn fixed(coordinate: Coordinate) -> Self {
        Self {
            latitude: Some(coordinate.latitude()),
            longitude: Some(coordinate.longitude()),
            accuracy_m: None,
        }
    }

    /// The configured coordinate, if complete and in range
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng).ok(),
            _ => None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        match (self.latitude, self.longitude) {
            (None, None) => {},
            (Some(lat), Some(lng)) => {
                Coordinate::new(lat, lng).map_err(|e| e.to_string())?;
            },
            _ => return Err("latitude and longitude must be set together".to_string()),
        }
        if let Some(accuracy) = self.accuracy_m {
            if !accuracy.is_finite() || accuracy < 0.0 {
                return Err(format!(
                    "accuracy_m must be a non-negative number, got {accuracy}"
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_config_conversion() {
        let config = NotificationsConfig {
            dismiss_after_ms: 1200,
        };
        assert_eq!(
            config.notifier_config().dismiss_after,
            Duration::from_millis(1200)
        );
        assert_eq!(
            NotificationsConfig::default().notifier_config(),
            NotifierConfig::default()
        );
    }

    #[test]
    fn test_formatter_uses_locale_offset_by_default() {
        let formatter = FormatConfig::default().formatter();
        assert_eq!(formatter, Formatter::default());
        assert_eq!(formatter.format_currency(50000.0), "50.000\u{a0}₫");
    }

    #[test]
    fn test_formatter_offset_override() {
        let config = FormatConfig {
            locale: LocalePreset::ViVn,
            utc_offset_minutes: Some(0),
        };
        assert_eq!(config.formatter().format_date("2024-03-15T20:00:00Z"), "15/3/2024");
        assert_eq!(
            FormatConfig::default().formatter().format_date("2024-03-15T20:00:00Z"),
            "16/3/2024"
        );
    }

    #[test]
    fn test_format_offset_validation() {
        let config = FormatConfig {
            utc_offset_minutes: Some(24 * 60),
            ..FormatConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(FormatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_location_requires_both_axes() {
        let config = LocationConfig {
            latitude: Some(21.0),
            ..LocationConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.coordinate().is_none());
    }

    #[test]
    fn test_location_range_checked() {
        let config = LocationConfig {
            latitude: Some(95.0),
            longitude: Some(105.0),
            accuracy_m: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_location_fixed() {
        let config = LocationConfig::fixed(Coordinate::hanoi());
        assert!(config.validate().is_ok());
        assert_eq!(config.coordinate(), Some(Coordinate::hanoi()));
    }

    #[test]
    fn test_negative_accuracy_rejected() {
        let config = LocationConfig {
            accuracy_m: Some(-1.0),
            ..LocationConfig::fixed(Coordinate::hanoi())
        };
        assert!(config.validate().is_err());
    }
}
