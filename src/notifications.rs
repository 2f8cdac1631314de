//! Transient user-facing messages and the small amount of UI state the
//! store keeps next to them.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default display time for a notification
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub visible: bool,
    pub shown_at: DateTime<Utc>,
    /// `None` keeps the notification until it is hidden explicitly
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind,
            message: message.into(),
            visible: true,
            shown_at: Utc::now(),
            duration: (!duration.is_zero()).then_some(duration),
        }
    }

    /// Visible and not yet past its display time at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        if !self.visible {
            return false;
        }
        match self.duration.and_then(|d| chrono::Duration::from_std(d).ok()) {
            Some(duration) => now < self.shown_at + duration,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Form,
    Favorites,
    History,
    Analytics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub advanced_filters_open: bool,
    pub analytics_open: bool,
    pub active_tab: ActiveTab,
    pub notification: Option<Notification>,
}
