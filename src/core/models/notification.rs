//! User-facing notifications
//!
//! Transient messages raised by the match session: a title, a one-line
//! description and a variant that decides how loudly to show it.

use serde::{Deserialize, Serialize};

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Normal, positive outcome
    #[default]
    Success,
    /// Failure or missing input
    Destructive,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Destructive => write!(f, "destructive"),
        }
    }
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short headline
    pub title: String,
    /// Details
    pub description: String,
    /// Presentation variant
    pub variant: Variant,
}

impl Notification {
    /// Create a success notification
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Success,
        }
    }

    /// Create a destructive notification
    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    /// Whether this reports a failure
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }
}
