//! Command-line shell around the delegation engine.
//!
//! Only the first token decides whether clap sees the arguments at all:
//! `list`, `add`, `remove` and `use` are ccenv subcommands, everything else
//! goes through argument analysis and is usually forwarded to claude.

mod commands;
mod help;
mod router;

use clap::{Arg, ArgAction, CommandFactory, Parser, Subcommand};

pub use commands::parse_header;
pub use router::run;

/// ccenv: switch Claude Code between API environments.
#[derive(Debug, Parser)]
#[command(
    name = "ccenv",
    version,
    about = "Run claude against a named API environment",
    disable_version_flag = true,
    disable_help_subcommand = true,
    after_help = "Any argument ccenv does not recognise is passed to claude unchanged."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List configured environments
    List,
    /// Add an environment
    Add {
        /// Unique name for the environment
        name: String,
        /// API base URL (prompted for if omitted)
        #[arg(long)]
        base_url: Option<String>,
        /// API key (prompted for if omitted)
        #[arg(long)]
        api_key: Option<String>,
        /// Model to export as ANTHROPIC_MODEL
        #[arg(long)]
        model: Option<String>,
        /// Extra header, exported as ANTHROPIC_HEADER_<NAME>
        #[arg(long = "header", value_name = "NAME=VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,
        /// Make this the default environment
        #[arg(long)]
        default: bool,
    },
    /// Remove an environment
    Remove {
        name: String,
    },
    /// Set the default environment
    Use {
        name: String,
    },
}

/// Clap command with `-v` as the version flag, matching the flag registry.
pub fn command() -> clap::Command {
    Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print version"),
    )
}

/// Whether `token` names a ccenv subcommand.
pub fn is_subcommand(token: &str) -> bool {
    command().find_subcommand(token).is_some()
}
