//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use codigo::adapters::placeholder::default_suggestions;
use codigo::core::models::{IcdEntry, MatchRecord, Notification};
use codigo::core::services::classify;
use codigo::output::{ClassifyReport, MatchReport, MatchStatus, OutputMode, render_results};

fn plain() {
    colored::control::set_override(false);
}

fn sample_records() -> Vec<MatchRecord> {
    vec![
        MatchRecord::matched(
            "99213".to_string(),
            "Procedure Description for 99213".to_string(),
            vec![IcdEntry::new("R51.9", "Diagnosis description for R51.9")],
        ),
        MatchRecord::unmatched(
            "99214".to_string(),
            "Procedure Description for 99214".to_string(),
            default_suggestions(),
        ),
    ]
}

// =============================================================================
// OutputMode Tests
// =============================================================================

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

// =============================================================================
// ClassifyReport Tests
// =============================================================================

#[test]
fn classify_report_serialization() {
    let report = ClassifyReport::new(classify("R51.9 99213 XYZ"));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["icd"][0], "R51.9");
    assert_eq!(json["cpt"][0], "99213");
    assert_eq!(json["invalid"][0], "XYZ");
    assert_eq!(json["total"], 3);
}

#[test]
fn classify_report_human_badges() {
    plain();
    let text = ClassifyReport::new(classify("xyz 99213 r51.9")).to_human();
    assert!(text.starts_with("Detected Codes (3)"));
    let icd = text.find("ICD: R51.9").unwrap();
    let cpt = text.find("CPT: 99213").unwrap();
    let invalid = text.find("! XYZ").unwrap();
    assert!(icd < cpt && cpt < invalid);
}

#[test]
fn classify_report_human_empty() {
    let text = ClassifyReport::new(classify("")).to_human();
    assert_eq!(text, "No codes detected.\n");
}

// =============================================================================
// Results Rendering Tests
// =============================================================================

#[test]
fn results_empty_state() {
    let text = render_results(&[]);
    assert!(text.starts_with("No results yet"));
}

#[test]
fn results_summary_and_cards() {
    plain();
    let text = render_results(&sample_records());
    assert!(text.contains("Total CPT Codes: 2   Matched: 1   Need Attention: 1"));
    assert!(text.contains("Matched ICD Codes (1)"));
    assert!(text.contains("R51.9  Diagnosis description for R51.9"));
    assert!(text.contains("No matching ICD codes found in your input list"));
    assert!(text.contains("M79.3  Panniculitis, unspecified  (85% match)"));
}

// =============================================================================
// MatchReport Serialization Tests
// =============================================================================

#[test]
fn match_report_serialization() {
    let report = MatchReport::new(
        MatchStatus::Results,
        classify("R51.9 99213 99214"),
        sample_records(),
        vec![Notification::success("Code matching complete!", "1 CPT codes matched, 1 need attention.")],
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "results");
    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["summary"]["need_attention"], 1);
    assert_eq!(json["results"][0]["has_matches"], true);
    assert!(json["results"][0].get("suggested_icd_codes").is_none());
    assert_eq!(json["results"][1]["suggested_icd_codes"][0]["confidence"], 85);
    assert_eq!(json["notifications"][0]["variant"], "success");
    assert!(json["completed_at"].is_string());
}

#[test]
fn match_report_skipped() {
    let report = MatchReport::new(MatchStatus::Skipped, classify("R51.9"), vec![], vec![]);
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"status\":\"skipped\""));
    assert!(json.contains("\"results\":[]"));
}
