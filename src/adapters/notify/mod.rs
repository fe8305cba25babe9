//! Notifier implementations
//!
//! - [`LogNotifier`] - forwards notifications to the `log` facade
//! - [`ConsoleNotifier`] - prints a colored banner to stderr
//! - [`ChannelNotifier`] - sends notifications over an `mpsc` channel

use std::sync::mpsc::{Receiver, Sender, channel};

use colored::Colorize;

use crate::core::models::{Notification, Variant};
use crate::core::ports::Notifier;

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.variant {
            Variant::Success => {
                log::info!("{}: {}", notification.title, notification.description);
            },
            Variant::Destructive => {
                log::warn!("{}: {}", notification.title, notification.description);
            },
        }
    }
}

/// Prints notifications to stderr so stdout stays parseable
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Text of the banner for a notification (uncolored when color is off)
    #[must_use]
    pub fn banner(notification: &Notification) -> String {
        let title = match notification.variant {
            Variant::Success => notification.title.green().bold(),
            Variant::Destructive => notification.title.red().bold(),
        };
        format!("{title}\n  {}", notification.description)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        eprintln!("{}", Self::banner(notification));
    }
}

/// Sends notifications to a receiver owned by someone else
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: Sender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel
    #[must_use]
    pub fn new() -> (Self, Receiver<Notification>) {
        let (tx, rx) = channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: &Notification) {
        if self.tx.send(notification.clone()).is_err() {
            log::debug!("notification receiver dropped: {}", notification.title);
        }
    }
}
