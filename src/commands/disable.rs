//! # Disable Command Implementation
//!
//! This module implements the `disable` subcommand, the counterpart of
//! `enable`: it turns the global unattended-upgrades toggle off while
//! leaving the configured selectors in place, so re-enabling restores the
//! previous coverage.

use anyhow::Result;
use clap::Args;

use apt_uu_config::output::{emoji, OutputConfig};

use super::SystemArgs;

/// Disable unattended upgrades globally
#[derive(Args, Debug)]
pub struct DisableArgs {
    #[command(flatten)]
    pub system: SystemArgs,
}

/// Execute the `disable` command.
pub fn execute(args: DisableArgs, output: &OutputConfig) -> Result<()> {
    let conf = args.system.conf_dir()?;
    let backup = conf.set_globally_enabled(false)?;

    println!(
        "{} Unattended upgrades {}",
        emoji(output, "✓", "[OK]"),
        output.disabled("disabled")
    );
    println!(
        "{}",
        output.dim(&format!(
            "Configuration file updated: {}",
            conf.auto_upgrades_path().display()
        ))
    );
    if let Some(backup) = backup {
        println!(
            "{}",
            output.dim(&format!("Backup created: {}", backup.display()))
        );
    }

    Ok(())
}
