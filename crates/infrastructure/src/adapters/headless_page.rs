//! In-memory page - Implements the page ports without a browser
//!
//! Keeps the notification container's children in page order and tracks
//! which tooltip triggers were activated. `render` produces the container
//! markup a browser would show.

use std::collections::BTreeSet;

use application::ports::{NotificationContainerPort, PageWidgetsPort};
use domain::entities::{ElementId, NotificationElement, NotificationMessage};
use parking_lot::Mutex;
use tracing::{debug, warn};

#[derive(Debug)]
struct PageState {
    next_id: u64,
    has_container: bool,
    /// Container children, first child first
    alerts: Vec<NotificationElement>,
    tooltip_triggers: Vec<ElementId>,
    active_tooltips: BTreeSet<ElementId>,
}

impl PageState {
    fn allocate(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId::new(self.next_id)
    }
}

/// Headless page with a notification container and widget framework
#[derive(Debug)]
pub struct HeadlessPage {
    state: Mutex<PageState>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    /// Empty page with a notification container
    #[must_use]
    pub fn new() -> Self {
        Self::with_container(true)
    }

    /// Page lacking the notification container
    #[must_use]
    pub fn without_container() -> Self {
        Self::with_container(false)
    }

    fn with_container(has_container: bool) -> Self {
        Self {
            state: Mutex::new(PageState {
                next_id: 0,
                has_container,
                alerts: Vec::new(),
                tooltip_triggers: Vec::new(),
                active_tooltips: BTreeSet::new(),
            }),
        }
    }

    /// Add an alert that was part of the page when it loaded
    ///
    /// Server-rendered alerts follow any existing ones.
    pub fn seed_alert(&self, message: NotificationMessage) -> ElementId {
        let mut state = self.state.lock();
        let id = state.allocate();
        state.alerts.push(NotificationElement::new(id, message));
        id
    }

    /// Add an element flagged for tooltip behaviour
    pub fn add_tooltip_trigger(&self) -> ElementId {
        let mut state = self.state.lock();
        let id = state.allocate();
        state.tooltip_triggers.push(id);
        id
    }

    /// Alerts currently shown, first child first
    #[must_use]
    pub fn alerts(&self) -> Vec<NotificationElement> {
        self.state.lock().alerts.clone()
    }

    /// Whether an element is still in the container
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.state.lock().alerts.iter().any(|alert| alert.id == id)
    }

    /// Tooltip triggers that have been activated
    #[must_use]
    pub fn active_tooltips(&self) -> Vec<ElementId> {
        self.state.lock().active_tooltips.iter().copied().collect()
    }

    /// Markup of the notification container
    ///
    /// Empty when the page has no container.
    #[must_use]
    pub fn render(&self) -> String {
        let state = self.state.lock();
        if !state.has_container {
            return String::new();
        }
        let children: String = state
            .alerts
            .iter()
            .map(NotificationElement::render_html)
            .collect();
        format!(r#"<div class="container">{children}</div>"#)
    }
}

impl NotificationContainerPort for HeadlessPage {
    fn prepend(&self, message: &NotificationMessage) -> Option<ElementId> {
        let mut state = self.state.lock();
        if !state.has_container {
            warn!("Page has no notification container");
            return None;
        }
        let id = state.allocate();
        state
            .alerts
            .insert(0, NotificationElement::new(id, message.clone()));
        debug!(%id, children = state.alerts.len(), "Alert inserted");
        Some(id)
    }

    fn remove(&self, id: ElementId) -> bool {
        let mut state = self.state.lock();
        let before = state.alerts.len();
        state.alerts.retain(|alert| alert.id != id);
        before != state.alerts.len()
    }
}

impl PageWidgetsPort for HeadlessPage {
    fn alert_elements(&self) -> Vec<ElementId> {
        self.state.lock().alerts.iter().map(|alert| alert.id).collect()
    }

    fn close_alert(&self, id: ElementId) {
        if !self.remove(id) {
            debug!(%id, "Alert already closed");
        }
    }

    fn tooltip_triggers(&self) -> Vec<ElementId> {
        self.state.lock().tooltip_triggers.clone()
    }

    fn activate_tooltip(&self, id: ElementId) {
        self.state.lock().active_tooltips.insert(id);
    }
}

#[cfg(test)]
mod tests {
    use domain::Severity;

    use super::*;

    #[test]
    fn test_prepend_inserts_before_existing_children() {
        let page = HeadlessPage::new();
        let first = page.prepend(&NotificationMessage::info("first")).unwrap();
        let second = page
            .prepend(&NotificationMessage::new("second", Severity::Success))
            .unwrap();

        let ids: Vec<_> = page.alerts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_prepend_without_container() {
        let page = HeadlessPage::without_container();
        assert!(page.prepend(&NotificationMessage::info("lost")).is_none());
        assert_eq!(page.render(), "");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let page = HeadlessPage::new();
        let id = page.prepend(&NotificationMessage::info("x")).unwrap();
        assert!(page.remove(id));
        assert!(!page.remove(id));
        assert!(!page.contains(id));
    }

    #[test]
    fn test_render_escapes_text() {
        let page = HeadlessPage::new();
        page.prepend(&NotificationMessage::new("<b>Hết xe</b>", Severity::Warning))
            .unwrap();
        let html = page.render();
        assert!(html.starts_with(r#"<div class="container"><div class="alert alert-warning alert-dismissible fade show""#));
        assert!(html.contains("&lt;b&gt;Hết xe&lt;/b&gt;"));
        assert!(html.contains("btn-close"));
    }

    #[test]
    fn test_seeded_alerts_are_widgets() {
        let page = HeadlessPage::new();
        let a = page.seed_alert(NotificationMessage::info("a"));
        let b = page.seed_alert(NotificationMessage::info("b"));
        assert_eq!(page.alert_elements(), vec![a, b]);

        page.close_alert(a);
        page.close_alert(a);
        assert_eq!(page.alert_elements(), vec![b]);
    }

    #[test]
    fn test_tooltip_activation_is_idempotent() {
        let page = HeadlessPage::new();
        let t = page.add_tooltip_trigger();
        assert_eq!(page.tooltip_triggers(), vec![t]);
        assert!(page.active_tooltips().is_empty());

        page.activate_tooltip(t);
        page.activate_tooltip(t);
        assert_eq!(page.active_tooltips(), vec![t]);
    }
}
