//! Code kinds
//!
//! The three buckets a token can be classified into.

use serde::{Deserialize, Serialize};

/// Kind of billing code a token was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    /// ICD-10-CM diagnosis code (e.g. `M79.3`)
    Icd,
    /// CPT procedure code (five digits, e.g. `99213`)
    Cpt,
    /// Matches neither pattern
    Invalid,
}

impl CodeKind {
    /// All kinds, in classification precedence order
    pub const ALL: [Self; 3] = [Self::Icd, Self::Cpt, Self::Invalid];

    /// Badge label shown in front of a code
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Icd => "ICD",
            Self::Cpt => "CPT",
            Self::Invalid => "INVALID",
        }
    }
}

impl std::fmt::Display for CodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Icd => write!(f, "icd"),
            Self::Cpt => write!(f, "cpt"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

impl std::str::FromStr for CodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "icd" => Ok(Self::Icd),
            "cpt" => Ok(Self::Cpt),
            "invalid" => Ok(Self::Invalid),
            _ => Err(format!("Invalid code kind: {s}. Use: icd, cpt, invalid")),
        }
    }
}
