//! Notifier port
//!
//! Defines the channel through which the session reports outcomes to the
//! user.

use super::super::models::Notification;

/// Sink for transient user notifications
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Deliver a notification
    fn notify(&self, notification: &Notification);
}
