//! The SmartRent bundle exposed to page logic
//!
//! One value holding the formatter, backend client, notifier and geolocator,
//! assembled from configuration. Collaborators are injected so page logic
//! and tests can swap any of them.

use std::sync::Arc;

use application::ports::{LocationServicePort, NotificationContainerPort, PageWidgetsPort};
use application::{
    ApplicationError, Geolocator, Notifier, NotifierConfig, PageInitReport, PageInitializer,
};
use domain::{Coordinate, DateLike, Formatter, Severity, calculate_distance};
use integration_smartrent::{HttpRentalClient, RentalApiError, RentalClient};
use thiserror::Error;
use tracing::info;

use crate::adapters::{HeadlessPage, StaticLocationService};
use crate::config::AppConfig;

/// Failure to assemble the bundle
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Configuration could not be loaded
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Configuration was loaded but is invalid
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The backend client could not be created
    #[error(transparent)]
    Client(#[from] RentalApiError),
}

/// Formatter, backend client, notifier and geolocator in one place
pub struct SmartRent {
    formatter: Formatter,
    api: Arc<dyn RentalClient>,
    notifier: Notifier,
    geolocator: Geolocator,
    notifier_config: NotifierConfig,
}

impl std::fmt::Debug for SmartRent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartRent")
            .field("formatter", &self.formatter)
            .field("notifier", &self.notifier)
            .field("geolocator", &self.geolocator)
            .finish_non_exhaustive()
    }
}

impl SmartRent {
    /// Assemble from explicit collaborators
    #[must_use]
    pub fn new(
        formatter: Formatter,
        api: Arc<dyn RentalClient>,
        container: Arc<dyn NotificationContainerPort>,
        geolocator: Geolocator,
        notifier_config: NotifierConfig,
    ) -> Self {
        Self {
            formatter,
            api,
            notifier: Notifier::new(container, notifier_config),
            geolocator,
            notifier_config,
        }
    }

    /// Assemble from configuration with the given page and location service
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(
        config: &AppConfig,
        container: Arc<dyn NotificationContainerPort>,
        location: Option<Arc<dyn LocationServicePort>>,
    ) -> Result<Self, ToolkitError> {
        config.validate().map_err(ToolkitError::Invalid)?;

        let api: Arc<dyn RentalClient> = Arc::new(HttpRentalClient::new(&config.api)?);
        let geolocator = location.map_or_else(Geolocator::unsupported, Geolocator::new);

        info!(
            base_url = %config.api.base_url,
            locale = %config.format.locale,
            location = geolocator.is_supported(),
            "SmartRent assembled"
        );

        Ok(Self::new(
            config.format.formatter(),
            api,
            container,
            geolocator,
            config.notifications.notifier_config(),
        ))
    }

    /// Assemble with a headless page and the configured fixed location
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn headless(config: &AppConfig) -> Result<(Self, Arc<HeadlessPage>), ToolkitError> {
        let page = Arc::new(HeadlessPage::new());
        let location = StaticLocationService::from_config(&config.location)
            .map(|service| Arc::new(service) as Arc<dyn LocationServicePort>);
        let toolkit = Self::from_config(config, Arc::clone(&page) as _, location)?;
        Ok((toolkit, page))
    }

    /// Configured formatter
    #[must_use]
    pub const fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Backend client
    #[must_use]
    pub fn api(&self) -> &Arc<dyn RentalClient> {
        &self.api
    }

    /// Notification banner
    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// User location lookup
    #[must_use]
    pub const fn geolocator(&self) -> &Geolocator {
        &self.geolocator
    }

    /// Render money in the configured locale
    #[must_use]
    pub fn format_currency(&self, amount: f64) -> String {
        self.formatter.format_currency(amount)
    }

    /// Render a date in the configured locale
    #[must_use]
    pub fn format_date(&self, value: impl Into<DateLike>) -> String {
        self.formatter.format_date(value)
    }

    /// Great-circle distance in kilometers
    #[must_use]
    pub fn calculate_distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        calculate_distance(lat1, lon1, lat2, lon2)
    }

    /// Show a transient notification
    pub fn show_notification(
        &self,
        message: impl Into<String>,
        severity: Severity,
    ) -> Result<domain::entities::ElementId, ApplicationError> {
        self.notifier.show_notification(message, severity)
    }

    /// Query the user's location once
    pub async fn get_user_location(&self) -> Result<Coordinate, application::GeolocationError> {
        self.geolocator.get_user_location().await
    }

    /// Run page-ready initialisation against the host widgets
    pub fn initialize_page(
        &self,
        widgets: Arc<dyn PageWidgetsPort>,
    ) -> Result<PageInitReport, ApplicationError> {
        PageInitializer::new(widgets, self.notifier_config).run()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use domain::entities::NotificationMessage;

    use super::*;
    use crate::config::LocationConfig;

    fn fast_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.notifications.dismiss_after_ms = 40;
        config
    }

    #[tokio::test]
    async fn test_headless_notifications_expire() {
        let (toolkit, page) = SmartRent::headless(&fast_config()).unwrap();

        let first = toolkit.show_notification("Đã đặt xe", Severity::Success).unwrap();
        let second = toolkit.show_notification("Pin yếu", Severity::Warning).unwrap();
        let ids: Vec<_> = page.alerts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![second, first]);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(page.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_page_closes_seeded_alerts() {
        let (toolkit, page) = SmartRent::headless(&fast_config()).unwrap();
        page.seed_alert(NotificationMessage::info("Chào mừng"));
        let trigger = page.add_tooltip_trigger();

        let report = toolkit.initialize_page(Arc::clone(&page) as _).unwrap();
        assert_eq!(report.alerts_scheduled, 1);
        assert_eq!(report.tooltips_activated, 1);
        assert_eq!(page.active_tooltips(), vec![trigger]);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(page.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_location_follows_config() {
        let (toolkit, _) = SmartRent::headless(&AppConfig::default()).unwrap();
        assert!(matches!(
            toolkit.get_user_location().await,
            Err(application::GeolocationError::LocationUnavailable)
        ));

        let mut config = AppConfig::default();
        config.location = LocationConfig::fixed(Coordinate::hanoi());
        let (toolkit, _) = SmartRent::headless(&config).unwrap();
        assert_eq!(
            toolkit.get_user_location().await.unwrap(),
            Coordinate::hanoi()
        );
    }

    #[test]
    fn test_formatting_and_distance() {
        let (toolkit, _) = SmartRent::headless(&AppConfig::default()).unwrap();
        assert_eq!(toolkit.format_currency(1_234_567.0), "1.234.567\u{a0}₫");
        assert_eq!(toolkit.format_date("2024-01-05"), "5/1/2024");

        let d = toolkit.calculate_distance(21.0285, 105.8542, 10.8231, 106.6297);
        assert!((1130.0..=1160.0).contains(&d));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            SmartRent::headless(&config),
            Err(ToolkitError::Invalid(_))
        ));
    }
}
