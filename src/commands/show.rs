//! # Show Command Implementation
//!
//! This module implements the `show` subcommand, the audit view over the
//! correlated system state. It has two targets:
//!
//! - **`show repos`**: every repository from `apt-cache policy` with its
//!   unattended-upgrades status; verbose mode lists which selectors matched
//!   each repository.
//! - **`show selectors`**: every configured selector per section; verbose
//!   mode runs the inverse query and lists the repositories each selector
//!   admits.
//!
//! Both targets support `--json` for machine-readable output, which always
//! bypasses color handling so piped output stays clean.
//!
//! This command is a safe, read-only operation that does not modify any
//! files.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use apt_uu_config::output::{emoji, OutputConfig};
use apt_uu_config::repository::Repository;
use apt_uu_config::selector::{Section, Selector};
use apt_uu_config::selector_set::SelectorSet;

use super::SystemArgs;

/// Show repositories or configured selectors in detail
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(subcommand)]
    pub target: ShowTarget,
}

#[derive(Subcommand, Debug)]
pub enum ShowTarget {
    /// Show all repositories with their unattended-upgrades status
    Repos(ReposArgs),
    /// Show the configured selectors
    Selectors(SelectorsArgs),
}

#[derive(Args, Debug)]
pub struct ReposArgs {
    #[command(flatten)]
    pub system: SystemArgs,

    /// Output as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Only show repositories that receive unattended upgrades.
    #[arg(long, conflicts_with = "disabled_only")]
    pub enabled_only: bool,

    /// Only show repositories that do not receive unattended upgrades.
    #[arg(long)]
    pub disabled_only: bool,

    /// Also list the selectors matching each repository.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct SelectorsArgs {
    #[command(flatten)]
    pub system: SystemArgs,

    /// Output as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Also list the repositories each selector matches.
    #[arg(short, long)]
    pub verbose: bool,
}

/// One repository row in `show repos --json` output.
#[derive(Serialize)]
struct RepoRow<'a> {
    #[serde(flatten)]
    repository: &'a Repository,
    enabled: bool,
    matched_by: Vec<&'a str>,
}

/// One selector row in `show selectors --json` output.
#[derive(Serialize)]
struct SelectorRow<'a> {
    #[serde(flatten)]
    selector: &'a Selector,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<String>>,
}

/// Execute the `show` command.
pub fn execute(args: ShowArgs, output: &OutputConfig) -> Result<()> {
    match args.target {
        ShowTarget::Repos(args) => show_repos(args, output),
        ShowTarget::Selectors(args) => show_selectors(args, output),
    }
}

fn show_repos(args: ReposArgs, output: &OutputConfig) -> Result<()> {
    let report = args.system.load_config()?;
    super::report_load_failures(&report.failures, output);
    let set = report.set;
    let repos = args.system.repositories()?;

    let rows: Vec<RepoRow> = repos
        .iter()
        .map(|repo| RepoRow {
            repository: repo,
            enabled: set.is_enabled(repo),
            matched_by: set
                .selectors_matching(repo)
                .into_iter()
                .map(Selector::raw)
                .collect(),
        })
        .filter(|row| match (args.enabled_only, args.disabled_only) {
            (true, _) => row.enabled,
            (_, true) => !row.enabled,
            _ => true,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if !set.globally_enabled {
        println!(
            "{}",
            output.warning("Unattended upgrades are globally disabled; no repository is updated.")
        );
    }

    for row in &rows {
        let marker = if row.enabled {
            output.enabled(emoji(output, "✓", "[x]"))
        } else {
            output.dim(emoji(output, "·", "[ ]"))
        };
        println!("{marker} {}", row.repository.format_full());
        if args.verbose {
            let details = row.repository.format_details();
            if !details.is_empty() {
                println!("    {}", output.dim(&details));
            }
            for raw in &row.matched_by {
                println!("    {}", output.dim(&format!("matched by: {raw}")));
            }
        }
    }

    println!(
        "{} of {} repositories enabled",
        rows.iter().filter(|r| r.enabled).count(),
        rows.len()
    );

    Ok(())
}

fn show_selectors(args: SelectorsArgs, output: &OutputConfig) -> Result<()> {
    let report = args.system.load_config()?;
    super::report_load_failures(&report.failures, output);
    let set = report.set;

    // The inverse query needs the repositories; skip the policy read
    // entirely in the non-verbose case.
    let repos: Vec<Repository> = if args.verbose {
        args.system.repositories()?
    } else {
        Vec::new()
    };

    if args.json {
        let rows: Vec<SelectorRow> = set
            .selectors()
            .iter()
            .map(|selector| SelectorRow {
                selector,
                matches: args.verbose.then(|| {
                    set.matches_for(selector, &repos)
                        .into_iter()
                        .map(Repository::format_compact)
                        .collect()
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for section in [Section::AllowedOrigins, Section::OriginsPattern] {
        println!("{}", output.dim(&format!("{section}:")));
        let mut any = false;
        for selector in set.section_selectors(section) {
            any = true;
            println!("  \"{}\"", selector.raw());
            if args.verbose {
                let matched = set.matches_for(selector, &repos);
                if matched.is_empty() {
                    println!("    {}", output.warning("matches no repository"));
                } else {
                    for repo in matched {
                        println!("    {}", output.dim(&repo.format_compact()));
                    }
                }
            }
        }
        if !any {
            println!("  {}", output.dim("(none)"));
        }
    }

    Ok(())
}
