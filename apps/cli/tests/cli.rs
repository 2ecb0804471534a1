//! End-to-end runs of the `safeact` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn safeact() -> Command {
    let mut cmd = Command::cargo_bin("safeact").unwrap();
    cmd.env_remove("SAFEACT_CONFIG")
        .env_remove("SAFEACT_APP_CALLER__PERSIST_DATA")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn accepted_alert_revalidates_the_current_page() {
    safeact()
        .args(["send-alert", "--from", "Bob", "--alert", "Fire"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("From: Bob\nAlert: Fire\n"))
        .stdout(predicate::str::contains(
            r#"Data: {"message":"From: Bob\nAlert: Fire"}"#,
        ))
        .stdout(predicate::str::contains("Error: null"))
        .stdout(predicate::str::contains("Is Running: No"))
        .stdout(predicate::str::contains("Revalidated: /"));
}

#[test]
fn default_sender_is_refused_without_revalidation() {
    safeact()
        .arg("send-alert")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"Data: {"failure":{"message":"Ethan is not allowed to send alerts!"}}"#,
        ))
        .stdout(predicate::str::contains("Revalidated: (none)"));
}

#[test]
fn extra_paths_come_before_the_current_route() {
    safeact()
        .args([
            "send-alert",
            "--from",
            "Bob",
            "--path",
            "/alerts",
            "--route",
            "/inbox",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revalidated: /alerts, /inbox"));
}

#[test]
fn invalid_input_is_reported_as_validation_error() {
    safeact()
        .args(["send-alert", "--input", r#"{"from": "Bob"}"#])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Data: null"))
        .stdout(predicate::str::contains(r#"Error: "validation: "#))
        .stdout(predicate::str::contains("Revalidated: (none)"));
}

#[test]
fn malformed_json_input_is_a_usage_error() {
    safeact()
        .args(["send-alert", "--input", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input is not valid JSON"));
}

#[test]
fn strict_cache_rejects_unknown_route() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[route]
strict = true
known = ["/"]
"#
    )
    .unwrap();

    safeact()
        .arg("--config")
        .arg(file.path())
        .args(["send-alert", "--from", "Bob", "--route", "/missing"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "revalidation of `/missing` failed: route not found",
        ))
        .stdout(predicate::str::contains("Data: null"));
}

#[test]
fn config_reflects_environment() {
    safeact()
        .arg("config")
        .env("SAFEACT_APP_CALLER__PERSIST_DATA", "false")
        .assert()
        .success()
        .stdout(predicate::str::contains("persist_data = false"))
        .stdout(predicate::str::contains("revalidate_current_page = true"));
}

#[test]
fn missing_config_file_fails() {
    safeact()
        .args(["--config", "/definitely/not/here.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn completions_are_generated() {
    safeact()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("safeact"));
}
