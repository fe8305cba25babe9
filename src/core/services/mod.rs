//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`classifier`] - Split free text into ICD, CPT and invalid tokens
//! - [`session`] - Track input, requests and results of one entry form

pub mod classifier;
pub mod session;

pub use classifier::{
    CPT_PATTERN, ICD_PATTERN, PatternError, PatternRules, classify, classify_with, detect_kind,
    normalize, tokenize,
};
pub use session::{
    Completion, MatchRequest, MatchSession, RequestId, SessionOptions, SessionState, StalePolicy,
};
