//! # Enable Command Implementation
//!
//! This module implements the `enable` subcommand, which turns the global
//! unattended-upgrades toggle on by rewriting
//! `APT::Periodic::Unattended-Upgrade` in `20auto-upgrades`. Per-repository
//! coverage is managed separately by `origin enable`/`origin disable`.

use anyhow::Result;
use clap::Args;

use apt_uu_config::output::{emoji, OutputConfig};

use super::SystemArgs;

/// Enable unattended upgrades globally
#[derive(Args, Debug)]
pub struct EnableArgs {
    #[command(flatten)]
    pub system: SystemArgs,
}

/// Execute the `enable` command.
pub fn execute(args: EnableArgs, output: &OutputConfig) -> Result<()> {
    let conf = args.system.conf_dir()?;
    let backup = conf.set_globally_enabled(true)?;

    println!(
        "{} Unattended upgrades {}",
        emoji(output, "✓", "[OK]"),
        output.enabled("enabled")
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
