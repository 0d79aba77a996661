//! # Suggest Command Implementation
//!
//! This module implements the `suggest` subcommand: for every repository
//! that no configured selector covers, print the most specific selector
//! that would admit it, ready to paste into `origin enable`.
//!
//! The dpkg/status pseudo-repository is always skipped (it is not a source
//! of updates), and duplicate suggestions are collapsed since one repository
//! usually appears once per component and architecture in policy output.
//! Universal-wildcard fallbacks are printed with a warning since they would
//! match every repository on the system.
//!
//! This command is a safe, read-only operation that does not modify any
//! files.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use apt_uu_config::output::{emoji, OutputConfig};
use apt_uu_config::suggest::{suggest, Confidence, Suggestion};

use super::SystemArgs;

/// Suggest selectors for repositories not yet covered
#[derive(Args, Debug)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub system: SystemArgs,

    /// Output as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Suggest for every repository, including already-covered ones.
    #[arg(long)]
    pub all: bool,
}

/// One suggestion in `--json` output.
#[derive(Serialize)]
struct SuggestRow {
    #[serde(flatten)]
    suggestion: Suggestion,
    repository: String,
}

/// Execute the `suggest` command.
pub fn execute(args: SuggestArgs, output: &OutputConfig) -> Result<()> {
    let report = args.system.load_config()?;
    super::report_load_failures(&report.failures, output);
    let set = report.set;
    let repos = args.system.repositories()?;

    let mut rows: Vec<SuggestRow> = Vec::new();
    for repo in &repos {
        if repo.is_dpkg_status() {
            continue;
        }
        if !args.all && set.is_covered(repo) {
            continue;
        }
        let suggestion = suggest(repo);
        // Policy output repeats a repository per component/architecture.
        if rows
            .iter()
            .any(|row| row.suggestion.selector == suggestion.selector)
        {
            continue;
        }
        rows.push(SuggestRow {
            suggestion,
            repository: repo.format_full(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!(
            "{} Every repository is already covered by a selector",
            emoji(output, "✓", "[OK]")
        );
        return Ok(());
    }

    for row in &rows {
        println!(
            "{}: \"{}\"",
            row.suggestion.selector.section(),
            row.suggestion.selector.raw()
        );
        println!("  {}", output.dim(&format!("for {}", row.repository)));
        if row.suggestion.confidence == Confidence::Fallback {
            println!(
                "  {}",
                output.warning(
                    "low confidence: this repository publishes no usable metadata, \
                     the selector above matches every repository"
                )
            );
        }
    }

    Ok(())
}
