//! Rental backend client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the rental backend client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalApiConfig {
    /// Base URL of the backend, without trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    ///
    /// Unset by default: requests then wait as long as the HTTP stack does.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_user_agent() -> String {
    format!("SmartRent/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RentalApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl RentalApiConfig {
    /// Configuration pointing at a given backend
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: Some(5),
            ..Default::default()
        }
    }

    /// Request timeout, if one is configured
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(format!(
                "base_url must start with http:// or https://, got {base_url}"
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be greater than 0 when set".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RentalApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout_secs, None);
        assert!(config.timeout().is_none());
        assert!(config.user_agent.starts_with("SmartRent/"));
    }

    #[test]
    fn test_testing_config() {
        let config = RentalApiConfig::for_testing();
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_validation_success() {
        assert!(RentalApiConfig::default().validate().is_ok());
        assert!(
            RentalApiConfig::with_base_url("https://rent.example.vn")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_validation_empty_base_url() {
        assert!(RentalApiConfig::with_base_url("").validate().is_err());
    }

    #[test]
    fn test_validation_bad_scheme() {
        assert!(RentalApiConfig::with_base_url("ftp://x").validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = RentalApiConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RentalApiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RentalApiConfig::default());
    }
}
