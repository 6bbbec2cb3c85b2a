//! CLI entry-point for rendering safety cards to disk.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data,
    ui::{card::TrialArmSafetyCard, dashboard::render_dashboard},
};

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// JSON/CSV file or directory of trial arms (defaults to the data dir).
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Render only the card for this arm code.
    #[arg(long)]
    pub arm: Option<String>,
    /// Output file (defaults to `safety_cards.html` in the outputs dir).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Page title for the dashboard.
    #[arg(long, default_value = "Trial Arm Safety")]
    pub title: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args.input.unwrap_or_else(|| settings.data_dir.clone());
    let arms = data::load_path(&input)
        .with_context(|| format!("loading trial arms from {}", input.display()))?;

    let html = match &args.arm {
        Some(code) => {
            let arm = arms
                .iter()
                .find(|arm| arm.arm_code.eq_ignore_ascii_case(code))
                .ok_or_else(|| anyhow!("no trial arm with code {code}"))?;
            TrialArmSafetyCard::new(arm).render()?
        }
        None => render_dashboard(&args.title, &arms)?,
    };

    let out_path = args
        .out
        .unwrap_or_else(|| settings.join_output("safety_cards.html"));
    if let Some(parent) = out_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&out_path, html)
        .await
        .with_context(|| format!("writing {}", out_path.display()))?;
    info!(path = %out_path.display(), arms = arms.len(), "wrote safety cards");
    Ok(())
}
