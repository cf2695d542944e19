//! One-shot page initialisation
//!
//! When the page becomes ready, alerts rendered by the server are scheduled
//! to close after the notification delay and every tooltip trigger gets its
//! tooltip behaviour.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::PageWidgetsPort;
use crate::services::notifier::NotifierConfig;

/// What page initialisation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInitReport {
    /// Alerts scheduled for dismissal
    pub alerts_scheduled: usize,
    /// Tooltips activated
    pub tooltips_activated: usize,
}

/// Runs page-ready initialisation against the host widget framework
pub struct PageInitializer {
    widgets: Arc<dyn PageWidgetsPort>,
    dismiss_after: Duration,
}

impl std::fmt::Debug for PageInitializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageInitializer")
            .field("dismiss_after", &self.dismiss_after)
            .finish_non_exhaustive()
    }
}

impl PageInitializer {
    /// Create an initializer using the notifier's dismissal delay
    #[must_use]
    pub fn new(widgets: Arc<dyn PageWidgetsPort>, config: NotifierConfig) -> Self {
        Self {
            widgets,
            dismiss_after: config.dismiss_after,
        }
    }

    /// Schedule dismissal of existing alerts and activate tooltips
    ///
    /// Calling this twice schedules the alerts twice and asks the widget
    /// framework to activate the same tooltips again; whether that is a
    /// no-op is up to the framework.
    ///
    /// # Errors
    ///
    /// `SchedulerUnavailable` when called outside an async runtime.
    #[instrument(skip(self))]
    pub fn run(&self) -> Result<PageInitReport, ApplicationError> {
        let handle = Handle::try_current().map_err(|_| ApplicationError::SchedulerUnavailable)?;

        let alerts = self.widgets.alert_elements();
        for id in &alerts {
            let widgets = Arc::clone(&self.widgets);
            let delay = self.dismiss_after;
            let id = *id;
            handle.spawn(async move {
                tokio::time::sleep(delay).await;
                debug!(%id, "Closing server-rendered alert");
                widgets.close_alert(id);
            });
        }

        let tooltips = self.widgets.tooltip_triggers();
        for id in &tooltips {
            self.widgets.activate_tooltip(*id);
        }

        let report = PageInitReport {
            alerts_scheduled: alerts.len(),
            tooltips_activated: tooltips.len(),
        };
        info!(
            alerts = report.alerts_scheduled,
            tooltips = report.tooltips_activated,
            "Page initialised"
        );
        Ok(report)
    }
}
