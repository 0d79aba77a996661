//! End-to-end tests for the `status` command
//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective.

mod common;
use common::prelude::*;

/// Test that --help flag shows help information
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_status_help() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("status")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Show the global unattended-upgrades state",
        ));
}

/// Test status on a fully configured system
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_status_enabled_system() {
    let fixture = TestFixture::new().enabled_system();

    fixture
        .command()
        .arg("status")
        .args(DISTRO)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unattended upgrades are enabled"))
        .stdout(predicate::str::contains("Allowed-Origins selectors: 1"))
        .stdout(predicate::str::contains("Origins-Pattern selectors: 1"))
        .stdout(predicate::str::contains("Distribution: Ubuntu noble"));
}

/// Test status when the toggle file says disabled
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_status_disabled() {
    let fixture = TestFixture::new()
        .with_auto_upgrades(configs::AUTO_DISABLED)
        .with_unattended(configs::UNATTENDED);

    fixture
        .command()
        .arg("status")
        .args(DISTRO)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unattended upgrades are disabled"));
}

/// Test status on an empty configuration directory: disabled, no selectors
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_status_empty_directory() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("status")
        .args(DISTRO)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unattended upgrades are disabled"))
        .stdout(predicate::str::contains("Allowed-Origins selectors: 0"))
        .stdout(predicate::str::contains("Origins-Pattern selectors: 0"));
}

/// Test that a selector with a typo in a field name is reported on stderr
/// but does not fail the command
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_status_reports_broken_selector() {
    let broken = r#"Unattended-Upgrade::Origins-Pattern {
	"origin=Docker";
	"oirgin=Typo";
};
"#;
    let fixture = TestFixture::new()
        .with_auto_upgrades(configs::AUTO_ENABLED)
        .with_unattended(broken);

    fixture
        .command()
        .arg("status")
        .args(DISTRO)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: skipped selector:"))
        .stderr(predicate::str::contains("oirgin"))
        .stdout(predicate::str::contains("Origins-Pattern selectors: 1"));
}

/// Test that an explicit nonexistent configuration directory is an error
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_status_missing_conf_dir() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("status")
        .arg("--apt-conf-dir")
        .arg("/nonexistent/apt.conf.d")
        .args(DISTRO)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "APT configuration directory not found",
        ));
}
