//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Build command for the buildguard-cli binary.
fn buildguard_cli() -> Command {
    cargo_bin_cmd!("buildguard-cli")
}

/// Path to buildguard library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("buildguard")
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_cli_help() {
    let mut cmd = buildguard_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("compatibility"));
}

#[test]
fn test_cli_version() {
    let mut cmd = buildguard_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_check_valid_build() {
    let mut cmd = buildguard_cli();

    cmd.arg("check").arg(fixtures_dir().join("build_ok.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Compatibility: OK"))
        .stdout(predicate::str::contains("Est. Wattage: 190W"));
}

#[test]
fn test_cli_check_bad_build_without_fail_on() {
    let mut cmd = buildguard_cli();

    cmd.arg("check").arg(fixtures_dir().join("build_bad.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Incompatible Socket"));
}

#[test]
fn test_cli_check_fail_on_error() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg(fixtures_dir().join("build_bad.json"))
        .arg("--fail-on")
        .arg("error");
    cmd.assert().failure();
}

#[test]
fn test_cli_check_fail_on_warning() {
    let headroom = fixtures_dir().join("build_headroom.json");

    buildguard_cli()
        .arg("check")
        .arg(&headroom)
        .arg("--fail-on")
        .arg("error")
        .assert()
        .success()
        .stdout(predicate::str::contains("Low Power Headroom"));

    buildguard_cli()
        .arg("check")
        .arg(&headroom)
        .arg("--fail-on")
        .arg("warning")
        .assert()
        .failure();
}

#[test]
fn test_cli_check_json_output() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg(fixtures_dir().join("build_bad.json"))
        .arg("--format")
        .arg("json");

    let output = cmd.output().expect("Should run");
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(json["result"]["valid"], false);
    assert_eq!(json["result"]["estimatedWattage"], 625);
    assert_eq!(json["result"]["errors"].as_array().map(|a| a.len()), Some(3));
}

#[test]
fn test_cli_check_rule_filter() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg(fixtures_dir().join("build_bad.json"))
        .arg("--rule")
        .arg("power_budget");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Insufficient Power"))
        .stdout(predicate::str::contains("Incompatible Socket").not());
}

#[test]
fn test_cli_check_unknown_rule() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg(fixtures_dir().join("build_bad.json"))
        .arg("--rule")
        .arg("cpu_sockt")
        .arg("--fail-on")
        .arg("error");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Compatibility: OK").not())
        .stderr(predicate::str::contains("Unknown rule: cpu_sockt"));
}

#[test]
fn test_cli_check_missing_file() {
    let mut cmd = buildguard_cli();

    cmd.arg("check").arg(fixtures_dir().join("nope.json"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_candidates() {
    let mut cmd = buildguard_cli();

    cmd.arg("candidates")
        .arg(fixtures_dir().join("build_ok.json"))
        .arg("--catalog")
        .arg(fixtures_dir().join("catalog.json"))
        .arg("--slot")
        .arg("case");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[OK] case-mid"))
        .stdout(predicate::str::contains("[Incompatible] case-itx"));
}

#[test]
fn test_cli_candidates_compatible_only() {
    let mut cmd = buildguard_cli();

    cmd.arg("candidates")
        .arg(fixtures_dir().join("build_ok.json"))
        .arg("--catalog")
        .arg(fixtures_dir().join("catalog.json"))
        .arg("--slot")
        .arg("case")
        .arg("--compatible-only");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("case-itx").not());
}

#[test]
fn test_cli_candidates_unknown_slot() {
    let mut cmd = buildguard_cli();

    cmd.arg("candidates")
        .arg(fixtures_dir().join("build_ok.json"))
        .arg("--catalog")
        .arg(fixtures_dir().join("catalog.json"))
        .arg("--slot")
        .arg("monitor");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown part category"));
}

#[test]
fn test_cli_related() {
    let mut cmd = buildguard_cli();

    cmd.arg("related")
        .arg("cpu-r7-7800x3d")
        .arg("--catalog")
        .arg(fixtures_dir().join("catalog.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Compatible Motherboards"))
        .stdout(predicate::str::contains("B650I Mini-ITX"));
}

#[test]
fn test_cli_rules() {
    let mut cmd = buildguard_cli();

    cmd.arg("rules").arg("--verbose");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cpu_socket"))
        .stdout(predicate::str::contains("power_budget"))
        .stdout(predicate::str::contains("DDR4/DDR5"));
}
