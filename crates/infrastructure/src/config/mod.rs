//! Application configuration
//!
//! Split into focused sub-modules:
//! - `page`: notification lifetime, formatting locale, fixed device location
//! - `logging`: log filter and output format
//!
//! The backend client section reuses [`RentalApiConfig`] directly.

mod logging;
mod page;

use std::path::Path;

use integration_smartrent::RentalApiConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use logging::{LogFormat, LoggingConfig};
pub use page::{FormatConfig, LocationConfig, NotificationsConfig};

/// Prefix of environment overrides, e.g. `SMARTRENT_API__BASE_URL`
pub const ENV_PREFIX: &str = "SMARTRENT";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "smartrent";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend client
    #[serde(default)]
    pub api: RentalApiConfig,

    /// Notification banner
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Currency and date formatting
    #[serde(default)]
    pub format: FormatConfig,

    /// Location service backing the geolocator
    #[serde(default)]
    pub location: LocationConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `smartrent.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file, or the default lookup if `None`
    ///
    /// An explicit file must exist. Environment variables always take
    /// precedence over file values.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., SMARTRENT_API__BASE_URL)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            base_url = %config.api.base_url,
            locale = %config.format.locale.tag(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting, prefixed with its section name.
    pub fn validate(&self) -> Result<(), String> {
        self.api.validate().map_err(|e| format!("api: {e}"))?;
        self.notifications
            .validate()
            .map_err(|e| format!("notifications: {e}"))?;
        self.format.validate().map_err(|e| format!("format: {e}"))?;
        self.location
            .validate()
            .map_err(|e| format!("location: {e}"))?;
        self.logging
            .validate()
            .map_err(|e| format!("logging: {e}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use domain::LocalePreset;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.notifications.dismiss_after_ms, 5000);
        assert_eq!(config.format.locale, LocalePreset::ViVn);
        assert!(config.location.coordinate().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            [api]
            base_url = "https://rent.example.vn"
            timeout_secs = 15

            [notifications]
            dismiss_after_ms = 2500

            [format]
            locale = "en-US"

            [location]
            latitude = 10.7769
            longitude = 106.7009

            [logging]
            level = "debug"
            format = "json"
            "#,
        );

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://rent.example.vn");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.notifications.dismiss_after_ms, 2500);
        assert_eq!(config.format.locale, LocalePreset::EnUs);
        assert_eq!(config.logging.format, LogFormat::Json);
        let location = config.location.coordinate().unwrap();
        assert!((location.latitude() - 10.7769).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[notifications]\ndismiss_after_ms = 100\n");
        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.notifications.dismiss_after_ms, 100);
        assert_eq!(config.api, RentalApiConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::load_from(Some(&missing)).is_err());
    }

    #[test]
    fn test_validation_names_section() {
        let mut config = AppConfig::default();
        config.notifications.dismiss_after_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("notifications:"));

        let mut config = AppConfig::default();
        config.api.base_url = "localhost".to_string();
        assert!(config.validate().unwrap_err().starts_with("api:"));
    }

    #[test]
    fn test_serde_roundtrip_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
