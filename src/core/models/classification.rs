//! Classification result
//!
//! The three insertion-ordered, deduplicated buckets produced by the
//! classifier. A result is never mutated once handed out; new input
//! produces a new result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::CodeKind;

/// Tokens of one input, split into ICD, CPT and invalid buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Tokens matching the ICD-10-CM pattern
    pub icd: Vec<String>,
    /// Tokens matching the CPT pattern
    pub cpt: Vec<String>,
    /// Tokens matching neither
    pub invalid: Vec<String>,
}

impl ClassificationResult {
    /// Create an empty result
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            icd: Vec::new(),
            cpt: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// Tokens in the given bucket
    #[must_use]
    pub fn bucket(&self, kind: CodeKind) -> &[String] {
        match kind {
            CodeKind::Icd => &self.icd,
            CodeKind::Cpt => &self.cpt,
            CodeKind::Invalid => &self.invalid,
        }
    }

    /// Number of distinct tokens across all buckets
    #[must_use]
    pub fn total(&self) -> usize {
        self.icd.len() + self.cpt.len() + self.invalid.len()
    }

    /// True when no tokens were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// True when both ICD and CPT codes are present, i.e. matching can run
    #[must_use]
    pub fn is_matchable(&self) -> bool {
        !self.icd.is_empty() && !self.cpt.is_empty()
    }

    /// True when there is nothing for the matcher to look at
    #[must_use]
    pub fn has_no_codes(&self) -> bool {
        self.icd.is_empty() && self.cpt.is_empty()
    }

    /// Which bucket a normalized token landed in, if any
    #[must_use]
    pub fn kind_of(&self, token: &str) -> Option<CodeKind> {
        CodeKind::ALL
            .into_iter()
            .find(|kind| self.bucket(*kind).iter().any(|t| t == token))
    }
}

/// Accumulates a [`ClassificationResult`] while keeping first-seen order
#[derive(Debug, Default)]
pub(crate) struct ClassificationBuilder {
    result: ClassificationResult,
    seen: HashSet<(CodeKind, String)>,
}

impl ClassificationBuilder {
    /// Add a normalized token to a bucket; duplicates are ignored
    pub(crate) fn push(&mut self, kind: CodeKind, token: String) {
        if !self.seen.insert((kind, token.clone())) {
            return;
        }
        match kind {
            CodeKind::Icd => self.result.icd.push(token),
            CodeKind::Cpt => self.result.cpt.push(token),
            CodeKind::Invalid => self.result.invalid.push(token),
        }
    }

    pub(crate) fn finish(self) -> ClassificationResult {
        self.result
    }
}
