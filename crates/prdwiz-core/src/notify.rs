//! Fire-and-forget user notifications.
//!
//! Producers hold a cloneable [`Notifier`]; the presentation layer owns the
//! matching [`NotificationCenter`], which keeps at most `max_visible`
//! notifications on screen and expires each one after a fixed time-to-live.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use log::trace;
use tokio::sync::mpsc;

/// Notifications kept on screen at once by default.
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// How long a notification stays visible by default.
pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Sending half of the notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Queue a notification. Never fails; a closed channel drops it silently.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let notification = Notification {
            kind,
            message: message.into(),
        };
        if self.tx.send(notification).is_err() {
            trace!("notification dropped, receiver closed");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }
}

/// Receiving half: buffers delivered notifications and applies the
/// visibility rules.
#[derive(Debug)]
pub struct NotificationCenter {
    tx: mpsc::UnboundedSender<Notification>,
    rx: mpsc::UnboundedReceiver<Notification>,
    max_visible: usize,
    ttl: Duration,
    active: VecDeque<(Instant, Notification)>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VISIBLE, DEFAULT_TTL)
    }
}

impl NotificationCenter {
    pub fn new(max_visible: usize, ttl: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            max_visible,
            ttl,
            active: VecDeque::new(),
        }
    }

    /// A new sender handle for this center.
    pub fn notifier(&self) -> Notifier {
        Notifier {
            tx: self.tx.clone(),
        }
    }

    /// Drain pending notifications, stamping them as shown at `now`.
    ///
    /// Returns the newly delivered notifications in send order. Expired
    /// entries are dropped and, when over capacity, the oldest ones go first.
    pub fn pump(&mut self, now: Instant) -> Vec<Notification> {
        let mut delivered = Vec::new();
        while let Ok(notification) = self.rx.try_recv() {
            delivered.push(notification.clone());
            self.active.push_back((now, notification));
        }

        let ttl = self.ttl;
        self.active
            .retain(|(shown_at, _)| now.saturating_duration_since(*shown_at) < ttl);
        while self.active.len() > self.max_visible {
            self.active.pop_front();
        }

        delivered
    }

    /// Notifications currently on screen, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<&Notification> {
        self.active
            .iter()
            .filter(|(shown_at, _)| now.saturating_duration_since(*shown_at) < self.ttl)
            .map(|(_, notification)| notification)
            .collect()
    }
}
