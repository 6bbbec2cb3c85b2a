//! HTML rendering of safety badges, arm cards and the dashboard page.

pub mod badge;
pub mod card;
pub mod dashboard;
pub mod tooltip;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Format with a fixed number of decimals, rounding halves away from zero.
pub fn fixed(value: f64, places: usize) -> String {
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", places, rounded)
}

/// Percentage with one decimal and a `%` sign, `N/A` when it cannot be computed.
pub fn percent_label(value: f64) -> String {
    if value.is_finite() {
        format!("{}%", fixed(value, 1))
    } else {
        "N/A".to_string()
    }
}
