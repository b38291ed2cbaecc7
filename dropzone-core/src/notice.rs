use crate::domain::NotificationMessage;
use std::time::{Duration, Instant};

/// Transient notification: opened by `show`, closed by `close` or by the
/// auto-hide deadline, whichever comes first.
#[derive(Debug)]
pub struct Snackbar {
    message: Option<NotificationMessage>,
    opened_at: Option<Instant>,
    auto_hide: Duration,
}

impl Snackbar {
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            message: None,
            opened_at: None,
            auto_hide,
        }
    }

    pub fn show(&mut self, message: NotificationMessage, now: Instant) {
        self.message = Some(message);
        self.opened_at = Some(now);
    }

    pub fn close(&mut self) {
        self.opened_at = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.opened_at.map(|t| t + self.auto_hide)
    }

    /// Apply the auto-hide deadline. Returns true if this call closed it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(d) if now >= d => {
                self.close();
                true
            }
            _ => false,
        }
    }

    pub fn is_open(&self, now: Instant) -> bool {
        self.deadline().is_some_and(|d| now < d)
    }

    pub fn visible(&self, now: Instant) -> Option<&NotificationMessage> {
        if self.is_open(now) {
            self.message.as_ref()
        } else {
            None
        }
    }

    /// Last message shown, whether or not it is still open.
    pub fn message(&self) -> Option<&NotificationMessage> {
        self.message.as_ref()
    }
}
