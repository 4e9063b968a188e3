//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Icon set tooling - merge, validate and inspect icon-set JSON documents
#[derive(Parser, Debug)]
#[command(name = "iconset")]
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
    /// Merge an old and a new version of an icon set
    Merge(commands::merge::MergeArgs),

    /// Check icon-set documents for broken aliases and stale references
    Validate(commands::validate::ValidateArgs),

    /// Show a summary of an icon set
    Info(commands::info::InfoArgs),

    /// Compare the visible content of two icon sets
    Diff(commands::diff::DiffArgs),

    /// Resolve one icon or alias
    Resolve(commands::resolve::ResolveArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // RUST_LOG, when set, takes precedence over --log-level.
        let _ = env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .parse_env("RUST_LOG")
            .format_timestamp(None)
            .try_init();

        let color = self.color.as_str();
        match self.command {
            Commands::Merge(args) => commands::merge::execute(args, color),
            Commands::Validate(args) => commands::validate::execute(args, color),
            Commands::Info(args) => commands::info::execute(args, color),
            Commands::Diff(args) => commands::diff::execute(args, color),
            Commands::Resolve(args) => commands::resolve::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
