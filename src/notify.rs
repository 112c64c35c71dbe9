//! User-facing success/failure notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Receives the result of a submission for presentation
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    fn success(&mut self, message: &str);
    fn failure(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// A transient message shown in the notification bar
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTIFICATION_TTL
    }
}

/// Notification queue rendered by the status area, newest last
#[derive(Debug, Default)]
pub struct StatusNotifier {
    queue: VecDeque<Notification>,
}

impl StatusNotifier {
    /// Most recent notification that has not expired
    pub fn current(&self) -> Option<&Notification> {
        self.queue.back().filter(|n| !n.is_expired())
    }

    /// Drop expired notifications
    pub fn prune(&mut self) {
        self.queue.retain(|n| !n.is_expired());
    }

    pub fn dismiss(&mut self) {
        self.queue.pop_back();
    }

    fn push(&mut self, level: NotificationLevel, message: &str) {
        self.queue.push_back(Notification {
            level,
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }
}

impl NotificationSink for StatusNotifier {
    fn success(&mut self, message: &str) {
        self.push(NotificationLevel::Success, message);
    }

    fn failure(&mut self, message: &str) {
        self.push(NotificationLevel::Failure, message);
    }
}
