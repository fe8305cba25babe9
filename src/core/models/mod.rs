//! Domain models for codigo
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`CodeKind`] - ICD, CPT or invalid
//! - [`ClassificationResult`] - Tokens of one input, bucketed by kind
//! - [`MatchRecord`] - "This CPT code is supported by these ICD codes"
//! - [`Notification`] - A transient message for the user

mod classification;
mod code_kind;
mod match_record;
mod notification;

pub(crate) use classification::ClassificationBuilder;
pub use classification::ClassificationResult;
pub use code_kind::CodeKind;
pub use match_record::{IcdEntry, IcdSuggestion, MatchRecord, MatchSummary};
pub use notification::{Notification, Variant};
