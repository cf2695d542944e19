//! Host page ports
//!
//! The page is owned by the host UI. The notifier only needs a container it
//! can prepend alert elements to; page initialisation needs the widget
//! framework that fades alerts out and wires up tooltips.

use domain::entities::{ElementId, NotificationMessage};
#[cfg(test)]
use mockall::automock;

/// The designated region of the page that holds notifications
#[cfg_attr(test, automock)]
pub trait NotificationContainerPort: Send + Sync {
    /// Render a dismissible element for `message` and insert it before every
    /// existing child of the container.
    ///
    /// Returns `None` when the page has no notification container.
    fn prepend(&self, message: &NotificationMessage) -> Option<ElementId>;

    /// Remove an element from the page
    ///
    /// Returns `false` if the element was already gone.
    fn remove(&self, id: ElementId) -> bool;
}

/// Widget behaviour provided by the host UI framework
#[cfg_attr(test, automock)]
pub trait PageWidgetsPort: Send + Sync {
    /// All alert elements currently on the page
    fn alert_elements(&self) -> Vec<ElementId>;

    /// Close an alert through the framework's own dismissal mechanism
    fn close_alert(&self, id: ElementId);

    /// All elements flagged to show a tooltip
    fn tooltip_triggers(&self) -> Vec<ElementId>;

    /// Attach tooltip behaviour to an element
    fn activate_tooltip(&self, id: ElementId);
}
