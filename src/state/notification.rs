//! Transient notifications shown under the toolbar.
//!
//! A notification is raised by a user action and disappears on its own after
//! a fixed lifetime. Only the latest one is shown.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    created: Instant,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created: Instant::now(),
        }
    }

    fn is_expired(&self, now: Instant, lifetime: Duration) -> bool {
        now.duration_since(self.created) >= lifetime
    }
}

/// Holds the current notification and its lifetime.
#[derive(Debug, Clone)]
pub struct NotificationState {
    current: Option<Notification>,
    lifetime: Duration,
}

impl NotificationState {
    /// # Arguments
    /// * `lifetime_secs` - Seconds a notification stays visible
    pub fn new(lifetime_secs: f64) -> Self {
        Self {
            current: None,
            lifetime: Duration::from_secs_f64(lifetime_secs.max(0.0)),
        }
    }

    // ===== Queries =====

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    // ===== Mutations =====

    /// Replaces the current notification.
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.current = Some(Notification::new(level, message));
    }

    /// Drops the notification once its lifetime has passed.
    pub fn expire(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.lifetime))
        {
            self.current = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
