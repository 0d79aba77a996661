//! Shared test utilities for the CLI end-to-end tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().enabled_system();
//!     fixture.command().args(["status"]).args(DISTRO).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
    #[allow(unused_imports)]
    pub use super::DISTRO;
}

/// Distribution override arguments, appended after the subcommand so tests
/// never depend on the host's lsb_release or /etc/os-release.
#[allow(dead_code)]
pub const DISTRO: &[&str] = &["--distro-id", "Ubuntu", "--distro-codename", "noble"];

/// Common configuration and policy snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Global toggle turned on.
    pub const AUTO_ENABLED: &str = "APT::Periodic::Update-Package-Lists \"1\";\n\
                                    APT::Periodic::Unattended-Upgrade \"1\";\n";

    /// Global toggle turned off.
    pub const AUTO_DISABLED: &str = "APT::Periodic::Update-Package-Lists \"1\";\n\
                                     APT::Periodic::Unattended-Upgrade \"0\";\n";

    /// A realistic selector file: one variable-based colon selector and one
    /// key=value pattern.
    pub const UNATTENDED: &str = r#"// Automatically upgrade packages from these origins
Unattended-Upgrade::Allowed-Origins {
	"${distro_id}:${distro_codename}-security";
};

Unattended-Upgrade::Origins-Pattern {
	"origin=Docker,codename=noble";
};
"#;

    /// Saved `apt-cache policy` output: the dpkg pseudo-entry, two
    /// third-party repositories and the Ubuntu security/release pockets.
    pub const POLICY: &str = "\
Package files:
 100 /var/lib/dpkg/status
     release a=now
 500 https://download.docker.com/linux/ubuntu noble/stable amd64 Packages
     release o=Docker,a=noble,n=noble,l=Docker CE,c=stable,b=amd64
     origin download.docker.com
 500 https://pkgs.tailscale.com/stable/ubuntu noble/main amd64 Packages
     release o=Tailscale,n=noble,l=Tailscale,c=main,b=amd64
     origin pkgs.tailscale.com
 500 http://security.ubuntu.com/ubuntu noble-security/main amd64 Packages
     release v=24.04,o=Ubuntu,a=noble-security,n=noble,l=Ubuntu,c=main,b=amd64
     origin security.ubuntu.com
 500 http://archive.ubuntu.com/ubuntu noble/main amd64 Packages
     release v=24.04,o=Ubuntu,a=noble,n=noble,l=Ubuntu,c=main,b=amd64
     origin archive.ubuntu.com
Pinned packages:
";
}

/// A test fixture providing a temporary APT configuration directory and an
/// optional saved policy file.
///
/// Commands built through [`TestFixture::command`] point at the fixture via
/// the `APT_UU_CONF_DIR` and `APT_UU_POLICY_FILE` environment variables and
/// run with `NO_COLOR` set so assertions see plain text.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new fixture with an empty configuration directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the `20auto-upgrades` global-toggle file.
    pub fn with_auto_upgrades(self, content: &str) -> Self {
        self.temp_dir
            .child("20auto-upgrades")
            .write_str(content)
            .expect("Failed to write 20auto-upgrades");
        self
    }

    /// Write the `50unattended-upgrades` selector file.
    pub fn with_unattended(self, content: &str) -> Self {
        self.temp_dir
            .child("50unattended-upgrades")
            .write_str(content)
            .expect("Failed to write 50unattended-upgrades");
        self
    }

    /// Write a saved `apt-cache policy` capture.
    pub fn with_policy(self, content: &str) -> Self {
        self.temp_dir
            .child("policy.txt")
            .write_str(content)
            .expect("Failed to write policy capture");
        self
    }

    /// A fully populated system: toggle on, selectors configured, policy
    /// capture present.
    pub fn enabled_system(self) -> Self {
        self.with_auto_upgrades(configs::AUTO_ENABLED)
            .with_unattended(configs::UNATTENDED)
            .with_policy(configs::POLICY)
    }

    /// Get the path to the configuration directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path of a file inside the configuration directory.
    pub fn file(&self, name: &str) -> std::path::PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Read a file inside the configuration directory.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.file(name)).expect("Failed to read fixture file")
    }

    /// Create a command wired to this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("apt-uu-config");
        cmd.env("APT_UU_CONF_DIR", self.path())
            .env("NO_COLOR", "1")
            .env_remove("CLICOLOR_FORCE");
        if self.file("policy.txt").exists() {
            cmd.env("APT_UU_POLICY_FILE", self.file("policy.txt"));
        }
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
