//! End-to-end tests for the `tree` command.
//!
//! These tests invoke the actual CLI binary and validate the behavior of the
//! `tree` subcommand from a user's perspective.

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_tree_help() {
    let mut cmd = cargo_bin_cmd!("dependency-duplicator");

    cmd.arg("tree")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Display the projects of a reactor and their dependents",
        ));
}

#[test]
fn test_tree_shows_dependents() {
    let fixture = TestFixture::new().with_manifest(manifests::CORE_AND_APP);

    fixture
        .command()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("🌳 Project tree for:"))
        .stdout(predicate::str::contains("com.example:core:1.0.0"))
        .stdout(predicate::str::contains("com.example:app:1.0.0"));
}

#[test]
fn test_tree_depth_zero_shows_roots_only() {
    let fixture = TestFixture::new().with_manifest(manifests::CORE_AND_APP);

    fixture
        .command()
        .arg("tree")
        .arg("--depth")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example:core:1.0.0"))
        .stdout(predicate::str::contains("com.example:app:1.0.0").not());
}

#[test]
fn test_tree_cycle_fails() {
    let fixture = TestFixture::new().with_manifest(manifests::CYCLE);

    fixture
        .command()
        .arg("tree")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load manifest"));
}
