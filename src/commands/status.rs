//! # Status Command Implementation
//!
//! This module implements the `status` subcommand, which gives a one-glance
//! summary of the unattended-upgrades state: the global toggle and how many
//! selectors are configured per section.
//!
//! This command is a safe, read-only operation that does not modify any
//! files and does not need repository information, so it works without
//! `apt-cache`.

use anyhow::Result;
use clap::Args;

use apt_uu_config::output::{emoji, OutputConfig};
use apt_uu_config::selector::Section;

use super::SystemArgs;

/// Show the global unattended-upgrades state
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub system: SystemArgs,
}

/// Execute the `status` command.
pub fn execute(args: StatusArgs, output: &OutputConfig) -> Result<()> {
    let report = args.system.load_config()?;
    super::report_load_failures(&report.failures, output);

    let set = &report.set;
    if set.globally_enabled {
        println!(
            "{} Unattended upgrades are {}",
            emoji(output, "✓", "[ON]"),
            output.enabled("enabled")
        );
    } else {
        println!(
            "{} Unattended upgrades are {}",
            emoji(output, "✗", "[OFF]"),
            output.disabled("disabled")
        );
    }

    println!(
        "Allowed-Origins selectors: {}",
        set.section_selectors(Section::AllowedOrigins).count()
    );
    println!(
        "Origins-Pattern selectors: {}",
        set.section_selectors(Section::OriginsPattern).count()
    );

    println!(
        "{}",
        output.dim(&format!(
            "Distribution: {} {}",
            set.distro.id, set.distro.codename
        ))
    );

    Ok(())
}
