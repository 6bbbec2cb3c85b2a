//! CLI entry-point for printing one badge.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::ui::badge::{BadgeProps, BadgeSize, SafetyScoreBadge};

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Safety score, nominally 0-100.
    #[arg(long, allow_negative_numbers = true)]
    pub score: f64,
    /// Weighted Event Burden.
    #[arg(long)]
    pub web: f64,
    /// Event-Adjusted Incidence Rate, omitted from the tooltip when absent.
    #[arg(long)]
    pub eair: Option<f64>,
    #[arg(long, value_enum, default_value_t = BadgeSize::Md)]
    pub size: BadgeSize,
    /// Use a plain hover title instead of the detail tooltip.
    #[arg(long)]
    pub no_tooltip: bool,
    /// Render with the tooltip open.
    #[arg(long)]
    pub hover: bool,
}

#[instrument]
pub fn run(args: Args) -> Result<()> {
    let props = BadgeProps::new(args.score, args.web, args.eair)
        .size(args.size)
        .show_tooltip(!args.no_tooltip);
    let mut badge = SafetyScoreBadge::new(props);
    if args.hover {
        badge.on_pointer_enter();
    }
    let html = badge.render().context("rendering badge")?;
    println!("{html}");
    Ok(())
}
