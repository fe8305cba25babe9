//! Port traits (interfaces) for external collaborators
//!
//! These traits define the boundaries between the core session logic
//! and the outside world (matching backends, notification channels).
//!
//! Implementations live in the `adapters` module.

mod code_matcher;
mod notifier;

pub use code_matcher::CodeMatcher;
pub use notifier::Notifier;

#[cfg(test)]
pub use code_matcher::MockCodeMatcher;
#[cfg(test)]
pub use notifier::MockNotifier;
