//! Default values for apt-uu-config.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// The directory APT merges configuration fragments from.
pub const DEFAULT_CONF_DIR: &str = "/etc/apt/apt.conf.d";

/// Returns the default APT configuration directory.
///
/// This can be overridden by the `--apt-conf-dir` CLI flag or the
/// `APT_UU_CONF_DIR` environment variable, which the E2E tests rely on to
/// point at fixture directories.
pub fn default_conf_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONF_DIR)
}
