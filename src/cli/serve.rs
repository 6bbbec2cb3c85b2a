//! CLI entry-point for serving the HTTP API and rendered cards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    api::{self, AppState},
    config::Settings,
    data,
};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// JSON/CSV file or directory of trial arms (defaults to the data dir).
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args.input.unwrap_or_else(|| settings.data_dir.clone());
    let arms = data::load_path(&input)
        .with_context(|| format!("loading trial arms from {}", input.display()))?;
    api::serve(AppState::new(settings, arms), args.host, args.port).await
}
