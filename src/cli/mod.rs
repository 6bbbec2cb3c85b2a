//! Command-line interface wiring for trial-safety-view.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod badge;
pub mod classify;
pub mod render;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Clinical trial arm safety badges and cards", long_about = None)]
pub struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Classify(args) => classify::run(args),
            Commands::Badge(args) => badge::run(args),
            Commands::Render(args) => render::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the risk category for a safety score.
    Classify(classify::Args),
    /// Print the HTML of a single safety score badge.
    Badge(badge::Args),
    /// Render safety cards for loaded trial arms to an HTML file.
    Render(render::Args),
    /// Serve the JSON API and rendered cards.
    Serve(serve::Args),
}
