//! Entry point wiring CLI dispatch to the rendering and serving modules.

use anyhow::Result;
use tracing::info;
use trial_safety_view::{cli::Cli, config::Settings, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level)?;
    let settings = Settings::load()?;

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
