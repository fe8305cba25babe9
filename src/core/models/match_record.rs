//! Match records returned by a code matcher
//!
//! One record per CPT code: which of the entered ICD codes support it, or,
//! when none do, which ICD codes might.

use serde::{Deserialize, Serialize};

/// An ICD code paired with its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcdEntry {
    /// ICD-10-CM code
    pub code: String,
    /// Human-readable diagnosis
    pub description: String,
}

impl IcdEntry {
    /// Create a new entry
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// A suggested ICD code for a CPT code that had no match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcdSuggestion {
    /// ICD-10-CM code
    pub code: String,
    /// Human-readable diagnosis
    pub description: String,
    /// Confidence as a percentage (0-100)
    pub confidence: u8,
}

impl IcdSuggestion {
    /// Create a new suggestion; confidence is clamped to 100
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>, confidence: u8) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            confidence: confidence.min(100),
        }
    }
}

/// Association between one CPT code and the ICD codes that support it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// CPT procedure code
    pub cpt_code: String,
    /// Human-readable procedure description
    pub cpt_description: String,
    /// Entered ICD codes that support this procedure
    #[serde(default)]
    pub matched_icd_codes: Vec<IcdEntry>,
    /// Whether any entered ICD code matched
    pub has_matches: bool,
    /// Ranked suggestions, only present when nothing matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_icd_codes: Option<Vec<IcdSuggestion>>,
}

impl MatchRecord {
    /// Record for a CPT code with at least one matched ICD code
    #[must_use]
    pub fn matched(cpt_code: String, cpt_description: String, icd: Vec<IcdEntry>) -> Self {
        Self {
            cpt_code,
            cpt_description,
            has_matches: !icd.is_empty(),
            matched_icd_codes: icd,
            suggested_icd_codes: None,
        }
    }

    /// Record for a CPT code with no matched ICD code
    #[must_use]
    pub fn unmatched(
        cpt_code: String,
        cpt_description: String,
        suggestions: Vec<IcdSuggestion>,
    ) -> Self {
        let mut ranked = suggestions;
        ranked.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        Self {
            cpt_code,
            cpt_description,
            matched_icd_codes: Vec::new(),
            has_matches: false,
            suggested_icd_codes: Some(ranked),
        }
    }

    /// Suggestions, or an empty slice when there are none
    #[must_use]
    pub fn suggestions(&self) -> &[IcdSuggestion] {
        self.suggested_icd_codes.as_deref().unwrap_or_default()
    }
}

/// Counts shown above the result cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Number of CPT codes processed
    pub total: usize,
    /// CPT codes with at least one matched ICD code
    pub matched: usize,
    /// CPT codes that need attention
    pub need_attention: usize,
}

impl MatchSummary {
    /// Summarize a set of records
    #[must_use]
    pub fn of(records: &[MatchRecord]) -> Self {
        let matched = records.iter().filter(|r| r.has_matches).count();
        Self {
            total: records.len(),
            matched,
            need_attention: records.len() - matched,
        }
    }
}
