//! # Origin Command Implementation
//!
//! This module implements the `origin` subcommand group, which manages
//! unattended upgrades for specific repositories by adding selectors to or
//! removing them from `50unattended-upgrades`.
//!
//! The selector argument accepts both on-disk syntaxes; the section is
//! inferred from the shape: `field=value` pairs go to `Origins-Pattern`,
//! `Origin:Suite` goes to `Allowed-Origins`. Before touching the
//! configuration, `enable` verifies the selector actually matches at least
//! one repository on the system, so a typo in an origin name fails instead
//! of writing a dead selector.

use anyhow::Result;
use clap::{Args, Subcommand};

use apt_uu_config::output::{emoji, OutputConfig};
use apt_uu_config::selector::{Section, Selector};
use apt_uu_config::suggestions;

use super::SystemArgs;

/// Enable or disable unattended upgrades for specific repositories
#[derive(Args, Debug)]
pub struct OriginArgs {
    #[command(subcommand)]
    pub action: OriginAction,
}

#[derive(Subcommand, Debug)]
pub enum OriginAction {
    /// Add a selector so matching repositories receive unattended upgrades
    Enable(OriginActionArgs),
    /// Remove a selector from the configuration
    Disable(OriginActionArgs),
}

#[derive(Args, Debug)]
pub struct OriginActionArgs {
    #[command(flatten)]
    pub system: SystemArgs,

    /// The selector, e.g. "Ubuntu:noble-security" or
    /// "origin=Tailscale,site=pkgs.tailscale.com"
    pub selector: String,
}

/// Execute the `origin` command.
pub fn execute(args: OriginArgs, output: &OutputConfig) -> Result<()> {
    match args.action {
        OriginAction::Enable(args) => enable(args, output),
        OriginAction::Disable(args) => disable(args, output),
    }
}

/// Infer the configuration section from the selector's shape.
fn inferred_section(selector: &str) -> Section {
    if selector.contains('=') {
        Section::OriginsPattern
    } else {
        Section::AllowedOrigins
    }
}

fn enable(args: OriginActionArgs, output: &OutputConfig) -> Result<()> {
    let ctx = args.system.distro()?;
    let selector = Selector::parse(&args.selector, inferred_section(&args.selector), &ctx)?;

    let repos = args.system.repositories()?;
    let matched: Vec<_> = repos.iter().filter(|r| selector.matches(r)).collect();
    if matched.is_empty() {
        return Err(suggestions::no_matching_repository(&args.selector));
    }

    let conf = args.system.conf_dir()?;
    if conf.add_selector(&selector)? {
        println!(
            "{} Enabled {}: \"{}\"",
            emoji(output, "✓", "[OK]"),
            selector.section(),
            selector.raw()
        );
        for repo in matched {
            println!("  {}", output.dim(&repo.format_compact()));
        }
        println!(
            "{}",
            output.dim(&format!(
                "Configuration file updated: {}",
                conf.unattended_upgrades_path().display()
            ))
        );
    } else {
        println!(
            "{} Already configured, nothing to do: \"{}\"",
            emoji(output, "⊗", "[=]"),
            selector.raw()
        );
    }

    Ok(())
}

fn disable(args: OriginActionArgs, output: &OutputConfig) -> Result<()> {
    let ctx = args.system.distro()?;
    let selector = Selector::parse(&args.selector, inferred_section(&args.selector), &ctx)?;

    let conf = args.system.conf_dir()?;
    if conf.remove_selector(&selector)? {
        println!(
            "{} Disabled {}: \"{}\"",
            emoji(output, "✓", "[OK]"),
            selector.section(),
            selector.raw()
        );
        println!(
            "{}",
            output.dim(&format!(
                "Configuration file updated: {}",
                conf.unattended_upgrades_path().display()
            ))
        );
    } else {
        println!(
            "{} Selector not present, nothing to do: \"{}\"",
            emoji(output, "⊗", "[-]"),
            selector.raw()
        );
    }

    Ok(())
}
