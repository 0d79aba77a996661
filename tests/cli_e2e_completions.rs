//! End-to-end tests for the `completions` command
//!
//! These tests verify completion script generation for the supported
//! shells.

mod common;
use common::prelude::*;

/// Test that bash completions are generated
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_bash() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apt-uu-config"))
        .stdout(predicate::str::contains("complete"));
}

/// Test that zsh completions are generated
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_zsh() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef apt-uu-config"));
}

/// Test that fish completions are generated
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_fish() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apt-uu-config"));
}

/// Test that completions mention the subcommands
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_include_subcommands() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("suggest"))
        .stdout(predicate::str::contains("origin"));
}

/// Test that an unknown shell is rejected
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_unknown_shell() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
