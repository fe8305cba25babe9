//! Integration tests for the codigo CLI

use assert_cmd::cargo;
use predicates::prelude::*;

use super::common::TestConfig;

fn codigo() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("codigo"));
    cmd.env_remove("CODIGO_CONFIG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_version() {
    codigo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("codigo"));
}

#[test]
fn test_help() {
    codigo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ICD-10"));
}

#[test]
fn test_no_args_shows_info() {
    codigo().assert().success().stdout(predicate::str::contains("codigo v"));
}

#[test]
fn test_classify_argument() {
    codigo()
        .args(["classify", "M79.3, r51.9; 99213 XYZ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected Codes (4)"))
        .stdout(predicate::str::contains("ICD: R51.9"))
        .stdout(predicate::str::contains("CPT: 99213"));
}

#[test]
fn test_classify_stdin_json() {
    let output = codigo()
        .args(["--json", "classify"])
        .write_stdin("00100 001000 0010\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["cpt"], serde_json::json!(["00100"]));
    assert_eq!(json["invalid"], serde_json::json!(["001000", "0010"]));
    assert_eq!(json["total"], 3);
}

#[test]
fn test_match_json() {
    let output = codigo()
        .args(["--json", "match", "R51.9 99213 99214", "--latency-ms", "0", "--match-percent", "100"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "results");
    assert_eq!(json["summary"]["matched"], 2);
    assert_eq!(json["notifications"][0]["title"], "Code matching complete!");
}

#[test]
fn test_match_missing_codes() {
    codigo()
        .args(["match", "R51.9", "--latency-ms", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Missing codes"))
        .stdout(predicate::str::contains("No results yet"));
}

#[test]
fn test_match_failure_exits_nonzero() {
    codigo()
        .args(["match", "R51.9 99213", "--latency-ms", "0", "--fail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error processing codes"));
}

#[test]
fn test_match_uses_config() {
    let fixture = TestConfig::new("[matcher]\nlatency_ms = 0\nmatch_percent = 0\n");
    let output = codigo()
        .args(["--json", "--config"])
        .arg(fixture.path())
        .args(["match", "R51.9 99213"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"][0]["has_matches"], false);
    assert_eq!(json["results"][0]["suggested_icd_codes"][0]["code"], "M79.3");
}

#[test]
fn test_bad_config_fails() {
    let fixture = TestConfig::new("[patterns]\ncpt = \"([\"\n");
    codigo()
        .arg("--config")
        .arg(fixture.path())
        .args(["classify", "99213"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid cpt pattern"));
}

#[test]
fn test_session_reads_lines() {
    codigo()
        .args(["session", "--latency-ms", "0", "--match-percent", "100"])
        .write_stdin("R51.9\nR51.9 99213\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected Codes (2)"))
        .stdout(predicate::str::contains("Matched ICD Codes (1)"));
}

#[test]
fn test_session_quit() {
    codigo()
        .args(["session", "--latency-ms", "0"])
        .write_stdin(":quit\nR51.9 99213\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected Codes").not());
}
