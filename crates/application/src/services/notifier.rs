//! Page notification service
//!
//! Shows dismissible alert boxes at the top of the page's notification
//! container and removes each one after a fixed delay. Every notification
//! owns its own timer; notifications never interact.

use std::sync::Arc;
use std::time::Duration;

use domain::entities::{ElementId, NotificationMessage};
use domain::value_objects::Severity;
use tokio::runtime::Handle;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::NotificationContainerPort;

/// Default lifetime of a notification on the page
pub const DEFAULT_DISMISS_AFTER_MS: u64 = 5000;

/// Configuration for the notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierConfig {
    /// How long a notification stays before it is removed
    pub dismiss_after: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            dismiss_after: Duration::from_millis(DEFAULT_DISMISS_AFTER_MS),
        }
    }
}

/// Shows transient notifications on the page
pub struct Notifier {
    container: Arc<dyn NotificationContainerPort>,
    config: NotifierConfig,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Notifier {
    /// Create a notifier over a page container
    #[must_use]
    pub fn new(container: Arc<dyn NotificationContainerPort>, config: NotifierConfig) -> Self {
        Self { container, config }
    }

    /// Show `message` with the given severity
    ///
    /// The element is prepended to the container and removed again once
    /// the configured delay has passed.
    ///
    /// # Errors
    ///
    /// `ContainerMissing` if the page has no notification container,
    /// `SchedulerUnavailable` when called outside an async runtime.
    pub fn show_notification(
        &self,
        message: impl Into<String>,
        severity: Severity,
    ) -> Result<ElementId, ApplicationError> {
        self.show(NotificationMessage::new(message, severity))
    }

    /// Show a prepared notification message
    #[instrument(skip(self, message), fields(severity = %message.severity))]
    pub fn show(&self, message: NotificationMessage) -> Result<ElementId, ApplicationError> {
        let handle = Handle::try_current().map_err(|_| ApplicationError::SchedulerUnavailable)?;

        let id = self
            .container
            .prepend(&message)
            .ok_or(ApplicationError::ContainerMissing)?;

        let container = Arc::clone(&self.container);
        let delay = self.config.dismiss_after;
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if container.remove(id) {
                debug!(%id, "Notification expired");
            }
        });

        debug!(%id, "Notification shown");
        Ok(id)
    }

    /// Remove a notification before its timer fires
    ///
    /// Returns `false` if it was already gone.
    pub fn dismiss(&self, id: ElementId) -> bool {
        let removed = self.container.remove(id);
        if !removed {
            warn!(%id, "Dismissed notification was not on the page");
        }
        removed
    }

    /// Configured lifetime of a notification
    #[must_use]
    pub const fn dismiss_after(&self) -> Duration {
        self.config.dismiss_after
    }
}
