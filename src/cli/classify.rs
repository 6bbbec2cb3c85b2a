//! CLI entry-point for classifying a single safety score.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::safety::risk::classify;

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Safety score, nominally 0-100.
    #[arg(long, allow_negative_numbers = true)]
    pub score: f64,
}

#[instrument]
pub fn run(args: Args) -> Result<()> {
    let category = classify(args.score);
    println!(
        "{}\t{}\t{}\t{}",
        category.label(),
        category.id(),
        category.color(),
        category.api_code()
    );
    Ok(())
}
