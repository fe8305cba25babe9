//! Code matcher port
//!
//! Defines the interface for pairing CPT codes with the ICD codes that
//! support them.

use super::super::models::MatchRecord;

/// External service that matches CPT codes against ICD codes
///
/// Implementations may be slow (network, database) and may fail. Callers
/// pass only classified, deduplicated tokens and only when both slices are
/// non-empty.
#[cfg_attr(test, mockall::automock)]
pub trait CodeMatcher: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Produce one record per CPT code, in the order given
    fn match_codes(&self, icd: &[String], cpt: &[String]) -> anyhow::Result<Vec<MatchRecord>>;
}
