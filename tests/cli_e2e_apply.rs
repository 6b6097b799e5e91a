//! End-to-end tests for the `apply` command.
//!
//! These tests invoke the actual CLI binary and validate the behavior of the
//! `apply` subcommand from a user's perspective.

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_apply_help() {
    let mut cmd = cargo_bin_cmd!("dependency-duplicator");
    cmd.arg("apply")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run a duplication pass"))
        .stdout(predicate::str::contains("--manifest"))
        .stdout(predicate::str::contains("--strict"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_apply_text_report() {
    let fixture = TestFixture::new().with_manifest(manifests::CORE_AND_APP);

    fixture
        .command()
        .arg("--color=never")
        .arg("apply")
        .arg("-m")
        .arg(fixture.manifest_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[SCAN] Dependency duplication for"))
        .stdout(predicate::str::contains(
            "[ADD] [com.example:app:1.0.0] adding dependencies:",
        ))
        .stdout(predicate::str::contains(
            "    org.apache.commons:commons-lang3:jar:test",
        ))
        .stdout(predicate::str::contains(
            "[DONE] 2 dependencies added to 2 projects",
        ));
}

#[test]
fn test_apply_uses_default_manifest_in_current_dir() {
    let fixture = TestFixture::new().with_manifest(manifests::CORE_AND_APP);

    fixture
        .command()
        .arg("--color=never")
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("[DONE] 2 dependencies added"));
}

#[test]
fn test_apply_logs_to_stderr() {
    let fixture = TestFixture::new().with_manifest(manifests::CORE_AND_APP);

    fixture
        .command()
        .arg("--log-level=info")
        .arg("apply")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "[com.example:core:1.0.0] adding dependencies:",
        ))
        .stderr(predicate::str::contains("rebuilding project dependency graph"));
}

#[test]
fn test_apply_json_report() {
    let fixture = TestFixture::new().with_manifest(manifests::CORE_AND_APP);

    let output = fixture
        .command()
        .arg("apply")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["skipped"], false);
    assert_eq!(report["resequence"]["status"], "rebuilt");
    assert_eq!(report["matches"][0]["project"], "com.example:core:1.0.0");
    assert_eq!(report["additions"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_apply_writes_updated_manifest() {
    let fixture = TestFixture::new().with_manifest(manifests::CORE_AND_APP);
    let output = fixture.child("updated.yaml");

    fixture
        .command()
        .arg("--color=never")
        .arg("apply")
        .arg("--output")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[SAVE] Updated manifest written to"));

    output.assert(predicate::path::exists());
    output.assert(predicate::str::contains("scope: test"));
    output.assert(predicate::str::contains("commons-lang3"));
}

#[test]
fn test_apply_missing_manifest() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("apply")
        .arg("-m")
        .arg("missing.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reactor manifest not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_apply_strict_fails_on_invalid_pattern() {
    let fixture = TestFixture::new().with_manifest(manifests::INVALID_PATTERN);

    fixture
        .command()
        .arg("apply")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid dependency key pattern"));
}

#[test]
fn test_apply_lenient_reports_invalid_pattern() {
    let fixture = TestFixture::new().with_manifest(manifests::INVALID_PATTERN);

    fixture
        .command()
        .arg("--color=never")
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ERR] [com.example:core:1.0.0]"))
        .stdout(predicate::str::contains("0 dependencies added to 0 projects"));
}

#[test]
fn test_apply_invalid_yaml() {
    let fixture = TestFixture::new().with_manifest(manifests::INVALID_YAML);

    fixture
        .command()
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid reactor manifest"));
}
