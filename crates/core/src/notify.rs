//! Transient user-visible notifications.

use std::sync::Arc;
use std::time::Duration;

/// Message shown when a clipboard write fails.
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";

/// Notification palette.
pub mod colors {
    pub const SUCCESS: &str = "#4caf50";
    pub const SUCCESS_MUTED: &str = "#81c784";
    pub const FAILURE: &str = "#f44336";
    pub const FAILURE_MUTED: &str = "#e57373";
    pub const DEFAULT: &str = "#f5deb3";

    /// Look up a palette color by key, optionally its muted variant.
    ///
    /// Unknown keys fall back to [`DEFAULT`]; keys without a muted variant
    /// fall back to their base color.
    pub fn get(key: &str, muted: bool) -> &'static str {
        match (key, muted) {
            ("success", false) => SUCCESS,
            ("success", true) => SUCCESS_MUTED,
            ("failure", false) => FAILURE,
            ("failure", true) => FAILURE_MUTED,
            _ => DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// One transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
    pub color: &'static str,
    /// How long the host keeps it on screen.
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self { kind: NoticeKind::Success, message: message.into(), color: colors::get("success", false), duration }
    }

    pub fn failure(message: impl Into<String>, duration: Duration) -> Self {
        Self { kind: NoticeKind::Failure, message: message.into(), color: colors::get("failure", false), duration }
    }

    /// Success message for copying format `index` (0-based) of `total` with `label`.
    ///
    /// The `[i/N]` position is omitted when there is only one format.
    pub fn copied(label: &str, index: usize, total: usize, duration: Duration) -> Self {
        let position = if total > 1 { format!(" [{}/{}]", index + 1, total) } else { String::new() };
        Self::success(format!("Copied to clipboard{position}\n{label}"), duration)
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }

    /// Display time in whole milliseconds, saturating at `u64::MAX`.
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Receives the single notification produced by each invocation.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification);
    }
}
