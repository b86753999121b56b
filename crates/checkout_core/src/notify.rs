use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Destructive,
}

/// User-facing message raised by the order controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Surface for success and error messages (toast, alert, log line).
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Normal => info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
            Severity::Destructive => warn!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
        }
    }
}
