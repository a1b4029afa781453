//! Transient notifications with per-notification expiry.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

pub const MIN_NOTIFICATION_MS: u64 = 3000;
pub const MAX_NOTIFICATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

pub type NotificationId = u64;

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Local>,
    pub expires_at: Instant,
}

impl Notification {
    /// Wall-clock time the notification was raised, as `HH:MM:SS`.
    pub fn stamp(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NotificationDurations {
    pub error: Duration,
    pub success: Duration,
}

impl NotificationDurations {
    pub fn from_millis(error_ms: u64, success_ms: u64) -> Self {
        Self {
            error: clamp_duration(error_ms),
            success: clamp_duration(success_ms),
        }
    }

    pub fn for_severity(&self, severity: Severity) -> Duration {
        match severity {
            Severity::Error => self.error,
            Severity::Success => self.success,
        }
    }
}

impl Default for NotificationDurations {
    fn default() -> Self {
        Self::from_millis(5000, 3000)
    }
}

fn clamp_duration(ms: u64) -> Duration {
    Duration::from_millis(ms.clamp(MIN_NOTIFICATION_MS, MAX_NOTIFICATION_MS))
}

#[derive(Debug, Default)]
pub struct Feedback {
    notifications: Vec<Notification>,
    durations: NotificationDurations,
    next_id: NotificationId,
}

impl Feedback {
    pub fn new(durations: NotificationDurations) -> Self {
        Self {
            notifications: Vec::new(),
            durations,
            next_id: 0,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let duration = self.durations.for_severity(severity);
        self.notify_at(message, severity, duration, Instant::now())
    }

    /// Adds a notification that expires `duration` (clamped) after `now`.
    pub fn notify_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
        now: Instant,
    ) -> NotificationId {
        self.next_id += 1;
        let id = self.next_id;
        let duration = clamp_duration(duration.as_millis() as u64);
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            created_at: Local::now(),
            expires_at: now + duration,
        };
        tracing::debug!(
            id,
            severity = ?notification.severity,
            at = %notification.stamp(),
            message = %notification.message,
            "notification raised"
        );
        self.notifications.push(notification);
        id
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    pub fn dismiss_errors(&mut self) {
        self.notifications.retain(|n| n.severity != Severity::Error);
    }

    /// Drops every notification whose deadline has passed. Returns true if any were removed.
    pub fn prune_expired(&mut self, now: Instant) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.expires_at > now);
        self.notifications.len() != before
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn latest(&self, severity: Severity) -> Option<&Notification> {
        self.notifications.iter().rev().find(|n| n.severity == severity)
    }

    pub fn newest(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_notification_expires_on_its_own_deadline() {
        let mut feedback = Feedback::new(NotificationDurations::default());
        let start = Instant::now();
        let error = feedback.notify_at("boom", Severity::Error, Duration::from_millis(5000), start);
        let ok = feedback.notify_at("copied", Severity::Success, Duration::from_millis(3000), start);
        assert_eq!(feedback.notifications().len(), 2);

        assert!(feedback.prune_expired(start + Duration::from_millis(3000)));
        let remaining: Vec<_> = feedback.notifications().iter().map(|n| n.id).collect();
        assert_eq!(remaining, vec![error]);
        assert_ne!(error, ok);

        assert!(feedback.prune_expired(start + Duration::from_millis(5001)));
        assert!(feedback.notifications().is_empty());
    }

    #[test]
    fn durations_are_clamped_into_range() {
        let durations = NotificationDurations::from_millis(60_000, 10);
        assert_eq!(durations.error, Duration::from_millis(MAX_NOTIFICATION_MS));
        assert_eq!(durations.success, Duration::from_millis(MIN_NOTIFICATION_MS));

        let mut feedback = Feedback::new(durations);
        let start = Instant::now();
        feedback.notify_at("quick", Severity::Success, Duration::from_millis(1), start);
        assert!(!feedback.prune_expired(start + Duration::from_millis(2999)));
    }

    #[test]
    fn manual_dismissal_before_deadline() {
        let mut feedback = Feedback::default();
        let a = feedback.notify("first", Severity::Error);
        feedback.notify("second", Severity::Success);
        feedback.notify("third", Severity::Error);

        assert!(feedback.dismiss(a));
        assert!(!feedback.dismiss(a));
        assert_eq!(feedback.latest(Severity::Error).map(|n| n.message.as_str()), Some("third"));

        feedback.dismiss_errors();
        assert_eq!(feedback.notifications().len(), 1);
        assert_eq!(feedback.notifications()[0].severity, Severity::Success);
    }

    #[test]
    fn newest_notification_carries_wall_clock_stamp() {
        let mut feedback = Feedback::default();
        assert!(feedback.newest().is_none());
        let before = Local::now();
        feedback.notify("copied", Severity::Success);
        let after = Local::now();

        let newest = feedback.newest().unwrap();
        assert_eq!(newest.message, "copied");
        assert!(newest.created_at >= before && newest.created_at <= after);

        let stamp = newest.stamp();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp, newest.created_at.format("%H:%M:%S").to_string());
    }
}
