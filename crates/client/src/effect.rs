//! Side-effect descriptors returned by command handlers.
//!
//! Handlers never touch a UI. They describe what the host should do -
//! show a transient notification, navigate to another page - and the host
//! applies the effects however it renders. This keeps every state
//! transition testable as plain data.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Severity of a transient on-screen notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A transient user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }
}

/// A side effect the host should apply after a command handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a transient notification.
    Notify(Notification),
    /// Navigate to `target` after an optional grace delay (so the user can
    /// read the accompanying notification first).
    Redirect {
        target: String,
        delay: Option<Duration>,
    },
}

impl Effect {
    /// Standard delay between a notification and its follow-up redirect.
    pub const REDIRECT_GRACE: Duration = Duration::from_millis(1500);

    #[must_use]
    pub fn notify(notification: Notification) -> Self {
        Self::Notify(notification)
    }

    /// Immediate navigation.
    #[must_use]
    pub fn redirect(target: impl Into<String>) -> Self {
        Self::Redirect {
            target: target.into(),
            delay: None,
        }
    }

    /// Navigation after the standard grace delay.
    #[must_use]
    pub fn redirect_after_grace(target: impl Into<String>) -> Self {
        Self::Redirect {
            target: target.into(),
            delay: Some(Self::REDIRECT_GRACE),
        }
    }
}
