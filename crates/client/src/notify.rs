use std::time::{Duration, Instant};

/// How long a notification stays up unless dismissed earlier.
pub const AUTO_HIDE: Duration = Duration::from_secs(6);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

impl Notification {
    pub fn shown_at(&self) -> Instant {
        self.shown_at
    }
}

/// Single-slot notification channel.
///
/// A new notification replaces the visible one; nothing is queued. Expiry is driven by
/// [`Notifier::tick`] so callers control the clock.
#[derive(Debug)]
pub struct Notifier {
    current: Option<Notification>,
    auto_hide: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self {
            current: None,
            auto_hide: AUTO_HIDE,
        }
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_hide(auto_hide: Duration) -> Self {
        Self {
            current: None,
            auto_hide,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let message = message.into();
        match severity {
            Severity::Success => tracing::info!("{message}"),
            Severity::Error => tracing::warn!("{message}"),
        }
        self.current = Some(Notification {
            message,
            severity,
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Hides the notification once it has been visible for the auto-hide duration.
    /// Returns `true` when something was hidden.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= self.auto_hide);
        if expired {
            self.current = None;
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notification_replaces_the_previous_one() {
        let mut notifier = Notifier::new();
        let now = Instant::now();
        notifier.show_at("Wallet created successfully", Severity::Success, now);
        notifier.show_at("Failed to delete wallet", Severity::Error, now);

        let current = notifier.current().unwrap();
        assert_eq!(current.message, "Failed to delete wallet");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn auto_hides_after_six_seconds() {
        let mut notifier = Notifier::new();
        let start = Instant::now();
        notifier.show_at("Goal restored successfully", Severity::Success, start);

        assert!(!notifier.tick(start + Duration::from_millis(5_999)));
        assert!(notifier.is_visible());
        assert!(notifier.tick(start + AUTO_HIDE));
        assert!(!notifier.is_visible());
    }

    #[test]
    fn replacing_restarts_the_timer() {
        let mut notifier = Notifier::with_auto_hide(Duration::from_secs(2));
        let start = Instant::now();
        notifier.show_at("first", Severity::Success, start);
        notifier.show_at("second", Severity::Success, start + Duration::from_secs(1));

        assert!(!notifier.tick(start + Duration::from_secs(2)));
        assert!(notifier.tick(start + Duration::from_secs(3)));
    }

    #[test]
    fn dismiss_hides_immediately() {
        let mut notifier = Notifier::new();
        notifier.error("Failed to fetch goals");
        notifier.dismiss();
        assert!(notifier.current().is_none());
    }
}
