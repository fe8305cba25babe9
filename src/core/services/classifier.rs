//! Code classifier - splits free text into ICD, CPT and invalid tokens
//!
//! This module contains pure classification logic with no I/O dependencies.
//! Classification is total: every token lands in exactly one bucket and no
//! input makes it fail.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::core::models::{ClassificationBuilder, ClassificationResult, CodeKind};

/// ICD-10-CM: letter, two digits, optional `.` + 1-4 digits + optional letter
pub const ICD_PATTERN: &str = r"^[A-Z][0-9]{2}(\.[0-9]{1,4}[A-Z]?)?$";

/// CPT: exactly five digits
pub const CPT_PATTERN: &str = r"^[0-9]{5}$";

/// Runs of whitespace (byte order mark included), commas and semicolons
/// separate tokens
const DELIMITERS: &str = r"[\s\x{FEFF},;]+";

/// Byte order mark; editors prepend it to saved text
const BOM: char = '\u{FEFF}';

static DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DELIMITERS).expect("delimiter pattern is valid"));

static DEFAULT_RULES: LazyLock<PatternRules> = LazyLock::new(|| {
    PatternRules::new(ICD_PATTERN, CPT_PATTERN).expect("built-in patterns are valid")
});

/// Errors building custom pattern rules
#[derive(Debug, Error)]
pub enum PatternError {
    /// A pattern failed to compile
    #[error("invalid {kind} pattern {pattern:?}: {source}")]
    Invalid {
        /// Which rule the pattern was meant for
        kind: CodeKind,
        /// The offending pattern
        pattern: String,
        /// Regex compile error
        #[source]
        source: regex::Error,
    },
}

/// The two patterns a token is tested against, ICD first
#[derive(Debug, Clone)]
pub struct PatternRules {
    icd: Regex,
    cpt: Regex,
}

impl PatternRules {
    /// Compile rules from pattern strings
    ///
    /// Patterns are used as given; anchor them if a full-token match is meant.
    pub fn new(icd: &str, cpt: &str) -> Result<Self, PatternError> {
        let compile = |kind, pattern: &str| {
            Regex::new(pattern).map_err(|source| PatternError::Invalid {
                kind,
                pattern: pattern.to_string(),
                source,
            })
        };
        Ok(Self {
            icd: compile(CodeKind::Icd, icd)?,
            cpt: compile(CodeKind::Cpt, cpt)?,
        })
    }

    /// Rules with optional overrides on top of the built-in patterns
    pub fn with_overrides(icd: Option<&str>, cpt: Option<&str>) -> Result<Self, PatternError> {
        match (icd, cpt) {
            (None, None) => Ok(Self::default()),
            _ => Self::new(icd.unwrap_or(ICD_PATTERN), cpt.unwrap_or(CPT_PATTERN)),
        }
    }

    /// Source of the ICD pattern
    #[must_use]
    pub fn icd_pattern(&self) -> &str {
        self.icd.as_str()
    }

    /// Source of the CPT pattern
    #[must_use]
    pub fn cpt_pattern(&self) -> &str {
        self.cpt.as_str()
    }

    /// Classify an already normalized token
    #[must_use]
    pub fn kind_of(&self, normalized: &str) -> CodeKind {
        if self.icd.is_match(normalized) {
            CodeKind::Icd
        } else if self.cpt.is_match(normalized) {
            CodeKind::Cpt
        } else {
            CodeKind::Invalid
        }
    }
}

impl Default for PatternRules {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

/// Split text into trimmed, non-empty tokens (not yet normalized)
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    DELIMITER_RE.split(text).map(trim_token).filter(|t| !t.is_empty())
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// Normalize a token for testing and storage
#[must_use]
pub fn normalize(token: &str) -> String {
    trim_token(token).to_uppercase()
}

/// Detect the kind of a single raw token using the built-in patterns
#[must_use]
pub fn detect_kind(token: &str) -> CodeKind {
    DEFAULT_RULES.kind_of(&normalize(token))
}

/// Classify free text using the built-in patterns
///
/// # Examples
///
/// ```
/// use codigo::core::services::classify;
///
/// let result = classify("M79.3, R51.9; 99213\n99213");
/// assert_eq!(result.icd, vec!["M79.3", "R51.9"]);
/// assert_eq!(result.cpt, vec!["99213"]);
/// assert!(result.invalid.is_empty());
/// ```
#[must_use]
pub fn classify(text: &str) -> ClassificationResult {
    classify_with(text, &DEFAULT_RULES)
}

/// Classify free text using the given rules
#[must_use]
pub fn classify_with(text: &str, rules: &PatternRules) -> ClassificationResult {
    let mut builder = ClassificationBuilder::default();
    let mut count = 0usize;
    for raw in tokenize(text) {
        let token = normalize(raw);
        let kind = rules.kind_of(&token);
        builder.push(kind, token);
        count += 1;
    }
    let result = builder.finish();
    log::debug!(
        "classified {count} token(s): {} icd, {} cpt, {} invalid",
        result.icd.len(),
        result.cpt.len(),
        result.invalid.len()
    );
    result
}
