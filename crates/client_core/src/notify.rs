//! Transient success/error notifications that dismiss themselves.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use shared::domain::NotificationKind;
use uuid::Uuid;

use crate::view::AccountView;

pub const NOTIFICATION_DISPLAY: Duration = Duration::from_secs(3);
pub const NOTIFICATION_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "check-circle",
            NotificationKind::Error => "exclamation-circle",
        }
    }
}

#[derive(Clone)]
pub struct Notifier {
    view: Arc<dyn AccountView>,
    display: Duration,
    fade: Duration,
}

impl Notifier {
    pub fn new(view: Arc<dyn AccountView>) -> Self {
        Self::with_timing(view, NOTIFICATION_DISPLAY, NOTIFICATION_FADE)
    }

    pub fn with_timing(view: Arc<dyn AccountView>, display: Duration, fade: Duration) -> Self {
        Self {
            view,
            display,
            fade,
        }
    }

    /// Shows the notification and schedules its dismissal on the current
    /// tokio runtime.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        let notification = Notification::new(kind, message);
        let id = notification.id;
        self.view.show_notification(&notification);

        let view = Arc::clone(&self.view);
        let (display, fade) = (self.display, self.fade);
        tokio::spawn(async move {
            tokio::time::sleep(display).await;
            view.hide_notification(id);
            tokio::time::sleep(fade).await;
            view.remove_notification(id);
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.notify(NotificationKind::Error, message)
    }
}

#[cfg(test)]
#[path = "tests/notify_tests.rs"]
mod tests;
