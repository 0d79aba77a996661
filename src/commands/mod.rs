//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `apt-uu-config` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Commands that inspect or modify system state flatten [`SystemArgs`],
//! which carries the overrides that point the tool at fixture data instead
//! of the live system: the configuration directory, a saved
//! `apt-cache policy` capture, and the distribution identity.

pub mod completions;
pub mod disable;
pub mod enable;
pub mod origin;
pub mod show;
pub mod status;
pub mod suggest;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use apt_uu_config::apt_conf::{AptConfDir, LoadReport};
use apt_uu_config::error::Error;
use apt_uu_config::output::OutputConfig;
use apt_uu_config::policy;
use apt_uu_config::repository::Repository;
use apt_uu_config::suggestions;
use apt_uu_config::vars::DistroContext;
use apt_uu_config::{defaults, distro};

/// Overrides for the system state sources, shared by most commands.
#[derive(Args, Debug, Clone)]
pub struct SystemArgs {
    /// The APT configuration directory to read and write.
    ///
    /// Defaults to `/etc/apt/apt.conf.d`. Can also be set with the
    /// `APT_UU_CONF_DIR` environment variable.
    #[arg(long, value_name = "DIR", env = "APT_UU_CONF_DIR")]
    pub apt_conf_dir: Option<PathBuf>,

    /// Read saved 'apt-cache policy' output from FILE instead of running
    /// apt-cache.
    #[arg(long, value_name = "FILE", env = "APT_UU_POLICY_FILE")]
    pub policy_file: Option<PathBuf>,

    /// Override the detected distribution id (e.g. Ubuntu).
    #[arg(long, value_name = "ID")]
    pub distro_id: Option<String>,

    /// Override the detected distribution codename (e.g. noble).
    #[arg(long, value_name = "CODENAME")]
    pub distro_codename: Option<String>,
}

impl SystemArgs {
    /// The configuration directory handle. An explicitly given directory
    /// must exist; the default may be absent (non-Debian host) since reads
    /// tolerate missing files.
    pub fn conf_dir(&self) -> Result<AptConfDir> {
        match &self.apt_conf_dir {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(suggestions::conf_dir_not_found(dir));
                }
                Ok(AptConfDir::new(dir))
            }
            None => Ok(AptConfDir::new(defaults::default_conf_dir())),
        }
    }

    /// The distribution context, from overrides or detection.
    pub fn distro(&self) -> Result<DistroContext> {
        if let (Some(id), Some(codename)) = (&self.distro_id, &self.distro_codename) {
            return Ok(DistroContext::new(id, codename));
        }
        let mut ctx = distro::detect()?;
        if let Some(id) = &self.distro_id {
            ctx.id = id.clone();
        }
        if let Some(codename) = &self.distro_codename {
            ctx.codename = codename.clone();
        }
        Ok(ctx)
    }

    /// The repositories, from the saved capture or the live system.
    pub fn repositories(&self) -> Result<Vec<Repository>> {
        match &self.policy_file {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("Failed to read policy file {}: {e}", path.display())
                })?;
                Ok(policy::parse_policy_output(&content))
            }
            None => Ok(policy::load_system_policy()?),
        }
    }

    /// Load the selector configuration snapshot.
    pub fn load_config(&self) -> Result<LoadReport> {
        let ctx = self.distro()?;
        Ok(self.conf_dir()?.load(&ctx)?)
    }
}

/// Print the per-line selector parse failures collected during a load.
///
/// Skipped selectors are warnings here; the repository they would have
/// covered shows as disabled, which is the safe direction.
pub fn report_load_failures(failures: &[Error], output: &OutputConfig) {
    for failure in failures {
        eprintln!(
            "{} {failure}",
            output.warning("warning: skipped selector:")
        );
    }
}
