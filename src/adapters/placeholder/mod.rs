//! Placeholder matcher
//!
//! Implements `CodeMatcher` without any code database. Every CPT code gets a
//! generic description; whether it "matches" is a seeded pseudo-random draw,
//! so a given seed always produces the same records. Unmatched codes get a
//! fixed pair of suggestions.
//!
//! Stand-in until a real matching backend exists.

use std::time::Duration;

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::core::models::{IcdEntry, IcdSuggestion, MatchRecord};
use crate::core::ports::CodeMatcher;

/// Share of CPT codes reported as matched, in percent
pub const DEFAULT_MATCH_PERCENT: u8 = 70;

/// Simulated round-trip time
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// Most ICD codes attached to a single matched CPT code
const MAX_MATCHED_ICD: u64 = 3;

/// Matcher producing plausible-looking, deterministic placeholder records
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderMatcher {
    seed: u64,
    match_percent: u8,
    latency: Duration,
    fail: bool,
}

impl Default for PlaceholderMatcher {
    fn default() -> Self {
        Self {
            seed: 0,
            match_percent: DEFAULT_MATCH_PERCENT,
            latency: DEFAULT_LATENCY,
            fail: false,
        }
    }
}

impl PlaceholderMatcher {
    /// Create a matcher with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed for the match draw
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the share of CPT codes reported as matched (clamped to 100)
    #[must_use]
    pub fn with_match_percent(mut self, percent: u8) -> Self {
        self.match_percent = percent.min(100);
        self
    }

    /// Set the simulated latency
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every call fail
    #[must_use]
    pub const fn failing(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }

    fn draw(&self, cpt: &str) -> u64 {
        splitmix64(xxh3_64_with_seed(cpt.as_bytes(), self.seed))
    }

    fn record_for(&self, cpt: &str, icd: &[String]) -> MatchRecord {
        let draw = self.draw(cpt);
        let description = format!("Procedure Description for {cpt}");

        if draw % 100 < u64::from(self.match_percent) && !icd.is_empty() {
            // 1..=3 leading ICD codes, as many as are available
            let wanted = usize::try_from((draw >> 8) % MAX_MATCHED_ICD + 1).unwrap_or(1);
            let matched = icd
                .iter()
                .take(wanted)
                .map(|code| IcdEntry::new(code.clone(), format!("Diagnosis description for {code}")))
                .collect();
            MatchRecord::matched(cpt.to_string(), description, matched)
        } else {
            MatchRecord::unmatched(cpt.to_string(), description, default_suggestions())
        }
    }
}

impl CodeMatcher for PlaceholderMatcher {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn match_codes(&self, icd: &[String], cpt: &[String]) -> anyhow::Result<Vec<MatchRecord>> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        if self.fail {
            anyhow::bail!("placeholder matcher configured to fail");
        }
        Ok(cpt.iter().map(|code| self.record_for(code, icd)).collect())
    }
}

/// Suggestions offered for every unmatched CPT code
#[must_use]
pub fn default_suggestions() -> Vec<IcdSuggestion> {
    vec![
        IcdSuggestion::new("M79.3", "Panniculitis, unspecified", 85),
        IcdSuggestion::new("R51.9", "Headache, unspecified", 72),
    ]
}

const fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
