//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use apt_uu_config::output::OutputConfig;

use crate::commands;

/// Manage unattended upgrades configuration for APT
#[derive(Parser, Debug)]
#[command(name = "apt-uu-config")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the global unattended-upgrades state
    Status(commands::status::StatusArgs),

    /// Show repositories or configured selectors in detail
    Show(commands::show::ShowArgs),

    /// Enable unattended upgrades globally
    Enable(commands::enable::EnableArgs),

    /// Disable unattended upgrades globally
    Disable(commands::disable::DisableArgs),

    /// Enable or disable unattended upgrades for specific repositories
    Origin(commands::origin::OriginArgs),

    /// Suggest selectors for repositories not yet covered
    Suggest(commands::suggest::SuggestArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();

        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Status(args) => commands::status::execute(args, &output),
            Commands::Show(args) => commands::show::execute(args, &output),
            Commands::Enable(args) => commands::enable::execute(args, &output),
            Commands::Disable(args) => commands::disable::execute(args, &output),
            Commands::Origin(args) => commands::origin::execute(args, &output),
            Commands::Suggest(args) => commands::suggest::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
