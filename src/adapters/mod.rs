//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `placeholder/` - Deterministic stand-in `CodeMatcher`
//! - `notify/` - Log, console and channel `Notifier`s

pub mod notify;
pub mod placeholder;

pub use notify::{ChannelNotifier, ConsoleNotifier, LogNotifier};
pub use placeholder::PlaceholderMatcher;
