//! Notifications for a headless host.
//!
//! There is no toast surface on stdio, so notices go to the log and are also
//! returned in each tool result for the client to display.

use richlinker_core::{Notification, Notifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        let duration_ms = notification.duration_ms();
        if notification.is_success() {
            tracing::info!(message = %notification.message, color = notification.color, duration_ms, "notice");
        } else {
            tracing::warn!(message = %notification.message, color = notification.color, duration_ms, "notice");
        }
    }
}
