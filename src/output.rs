//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::core::models::{ClassificationResult, CodeKind, MatchRecord, MatchSummary, Notification};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Detected codes for one input
#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    /// The three buckets
    #[serde(flatten)]
    pub codes: ClassificationResult,
    /// Number of distinct tokens
    pub total: usize,
}

impl ClassifyReport {
    /// Wrap a classification
    #[must_use]
    pub fn new(codes: ClassificationResult) -> Self {
        let total = codes.total();
        Self { codes, total }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Human-readable text, badges in ICD, CPT, invalid order
    #[must_use]
    pub fn to_human(&self) -> String {
        if self.total == 0 {
            return "No codes detected.\n".to_string();
        }

        let badges: Vec<_> = CodeKind::ALL
            .into_iter()
            .flat_map(|kind| self.codes.bucket(kind).iter().map(move |code| badge(kind, code)))
            .collect();

        format!("Detected Codes ({})\n  {}\n", self.total, badges.join("  "))
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Colored badge for one detected code
fn badge(kind: CodeKind, code: &str) -> String {
    match kind {
        CodeKind::Icd => format!("{}: {code}", kind.label()).cyan().to_string(),
        CodeKind::Cpt => format!("{}: {code}", kind.label()).blue().to_string(),
        CodeKind::Invalid => format!("! {code}").red().to_string(),
    }
}

/// Outcome of a match run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Matcher returned records
    Results,
    /// Matcher failed
    Error,
    /// Input lacked ICD or CPT codes, nothing was sent
    Skipped,
}

/// Result of a match operation
#[derive(Debug, Serialize)]
pub struct MatchReport {
    /// How the run ended
    pub status: MatchStatus,
    /// Codes detected in the input
    pub codes: ClassificationResult,
    /// Summary counts
    pub summary: MatchSummary,
    /// One record per CPT code
    pub results: Vec<MatchRecord>,
    /// Notifications raised during the run
    pub notifications: Vec<Notification>,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

impl MatchReport {
    /// Assemble a report
    #[must_use]
    pub fn new(
        status: MatchStatus,
        codes: ClassificationResult,
        results: Vec<MatchRecord>,
        notifications: Vec<Notification>,
    ) -> Self {
        Self {
            status,
            summary: MatchSummary::of(&results),
            codes,
            results,
            notifications,
            completed_at: Utc::now(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                print!("{}", ClassifyReport::new(self.codes.clone()).to_human());
                println!();
                print!("{}", render_results(&self.results));
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Human-readable result cards with the summary on top
#[must_use]
pub fn render_results(results: &[MatchRecord]) -> String {
    if results.is_empty() {
        return "No results yet\n\
                Enter some ICD-10 and CPT codes above to see matching results\n"
            .to_string();
    }

    let summary = MatchSummary::of(results);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total CPT Codes: {}   Matched: {}   Need Attention: {}\n",
        summary.total,
        summary.matched.to_string().green(),
        summary.need_attention.to_string().red()
    );

    for record in results {
        render_card(&mut out, record);
    }
    out
}

fn render_card(out: &mut String, record: &MatchRecord) {
    let badge = format!("{}: {}", CodeKind::Cpt.label(), record.cpt_code);
    if record.has_matches {
        let _ = writeln!(out, "[ok] {}  {}", badge.green().bold(), record.cpt_description);
        let _ = writeln!(out, "     Matched ICD Codes ({})", record.matched_icd_codes.len());
        for icd in &record.matched_icd_codes {
            let _ = writeln!(out, "       {}  {}", icd.code, icd.description);
        }
    } else {
        let _ = writeln!(out, "[!!] {}  {}", badge.red().bold(), record.cpt_description);
        let _ = writeln!(out, "     No matching ICD codes found in your input list");
        let suggestions = record.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(out, "     Suggested ICD codes for this procedure:");
            for s in suggestions {
                let _ = writeln!(
                    out,
                    "       {}  {}  ({}% match)",
                    s.code, s.description, s.confidence
                );
            }
        }
    }
    out.push('\n');
}
