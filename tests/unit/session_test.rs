//! Tests for the match session
//!
//! The session ties classification, matcher requests and notifications
//! together, and decides what to do with outcomes that arrive late.

use codigo::core::models::{MatchRecord, Variant};
use codigo::core::ports::CodeMatcher;
use codigo::core::services::{Completion, SessionOptions, SessionState, StalePolicy};
use mockall::mock;

use super::common::{MIXED_INPUT, TestSession, instant_matcher};

mock! {
    pub Backend {}

    impl CodeMatcher for Backend {
        fn name(&self) -> &'static str;
        fn match_codes(&self, icd: &[String], cpt: &[String]) -> anyhow::Result<Vec<MatchRecord>>;
    }
}

// =============================================================================
// Request lifecycle
// =============================================================================

#[test]
fn test_input_with_both_kinds_starts_loading() {
    let mut t = TestSession::new(SessionOptions::default());
    let request = t.session.input_changed(MIXED_INPUT).unwrap();
    assert_eq!(t.session.state(), SessionState::Loading(request.id));
    assert_eq!(request.icd, vec!["M79.3", "R51.9", "A01.23B"]);
    assert_eq!(request.cpt, vec!["99213", "99214"]);
}

#[test]
fn test_request_ids_increase() {
    let mut t = TestSession::new(SessionOptions::default());
    let a = t.session.input_changed("R51.9 99213").unwrap();
    let b = t.session.input_changed("R51.9 99214").unwrap();
    let c = t.session.process().unwrap();
    assert!(a.id < b.id && b.id < c.id);
    assert_eq!(t.session.latest_request(), Some(c.id));
}

#[test]
fn test_matcher_receives_classified_codes() {
    let mut backend = MockBackend::new();
    backend.expect_name().return_const("backend");
    backend
        .expect_match_codes()
        .withf(|icd, cpt| icd.len() == 1 && icd[0] == "R51.9" && cpt.len() == 2 && cpt[1] == "99214")
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let mut t = TestSession::new(SessionOptions::default());
    let request = t.session.input_changed("r51.9 99213 99214 99213").unwrap();
    assert_eq!(t.session.run(&backend, &request), Completion::Applied);
}

#[test]
fn test_success_reports_counts() {
    let mut t = TestSession::new(SessionOptions::default());
    let matcher = instant_matcher().with_match_percent(100);
    let request = t.session.input_changed("R51.9 99213 99214").unwrap();
    t.session.run(&matcher, &request);

    let notifications = t.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Code matching complete!");
    assert_eq!(notifications[0].description, "2 CPT codes matched, 0 need attention.");
    assert_eq!(notifications[0].variant, Variant::Success);
    assert_eq!(t.session.summary().matched, 2);
}

#[test]
fn test_failure_reports_and_clears() {
    let mut t = TestSession::new(SessionOptions::default());
    let request = t.session.input_changed("R51.9 99213").unwrap();
    t.session.run(&instant_matcher().with_match_percent(0), &request);
    assert_eq!(t.session.results().len(), 1);

    let retry = t.session.process().unwrap();
    let done = t.session.run(&instant_matcher().failing(true), &retry);
    assert_eq!(done, Completion::Failed);
    assert!(t.session.results().is_empty());
    assert!(!t.session.is_loading());

    let last = t.drain().pop().unwrap();
    assert_eq!(last.title, "Error processing codes");
    assert_eq!(
        last.description,
        "Please try again or contact support if the issue persists."
    );
    assert!(last.is_destructive());
}

#[test]
fn test_missing_codes_notification() {
    let mut t = TestSession::new(SessionOptions::default());
    t.session.input_changed("R51.9 XYZ");
    assert!(t.session.process().is_none());
    let notifications = t.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Missing codes");
    assert_eq!(notifications[0].variant, Variant::Destructive);
}

#[test]
fn test_input_without_codes_clears_results() {
    let mut t = TestSession::new(SessionOptions::default());
    let request = t.session.input_changed("R51.9 99213").unwrap();
    t.session.run(&instant_matcher(), &request);
    assert!(!t.session.results().is_empty());

    assert!(t.session.input_changed("nothing here").is_none());
    assert!(t.session.results().is_empty());
    assert_eq!(t.session.codes().invalid, vec!["NOTHING", "HERE"]);
}

#[test]
fn test_input_with_one_kind_keeps_results() {
    let mut t = TestSession::new(SessionOptions::default());
    let request = t.session.input_changed("R51.9 99213").unwrap();
    t.session.run(&instant_matcher(), &request);

    assert!(t.session.input_changed("R51.9").is_none());
    assert_eq!(t.session.results().len(), 1);
}

// =============================================================================
// Stale responses
// =============================================================================

#[test]
fn test_late_outcome_is_discarded_by_default() {
    let mut t = TestSession::new(SessionOptions::default());
    let matcher = instant_matcher();
    let old = t.session.input_changed("R51.9 99213").unwrap();
    let new = t.session.input_changed("R51.9 99215").unwrap();

    let old_outcome = matcher.match_codes(&old.icd, &old.cpt);
    assert_eq!(t.session.complete(old.id, old_outcome), Completion::Stale);
    assert!(t.session.results().is_empty());
    assert!(t.drain().is_empty());

    t.session.run(&matcher, &new);
    assert_eq!(t.session.results()[0].cpt_code, "99215");
}

#[test]
fn test_late_failure_is_discarded_by_default() {
    let mut t = TestSession::new(SessionOptions::default());
    let old = t.session.input_changed("R51.9 99213").unwrap();
    let _new = t.session.input_changed("R51.9 99215").unwrap();
    let done = t.session.complete(old.id, Err(anyhow::anyhow!("timeout")));
    assert_eq!(done, Completion::Stale);
    assert!(t.session.is_loading());
}

#[test]
fn test_late_outcome_overwrites_when_applied() {
    let options = SessionOptions {
        stale_responses: StalePolicy::Apply,
        ..SessionOptions::default()
    };
    let mut t = TestSession::new(options);
    let matcher = instant_matcher();
    let old = t.session.input_changed("R51.9 99213").unwrap();
    let new = t.session.input_changed("R51.9 99215").unwrap();

    t.session.run(&matcher, &new);
    t.session.run(&matcher, &old);
    assert_eq!(t.session.results()[0].cpt_code, "99213");
    assert_eq!(t.drain().len(), 2);
}
