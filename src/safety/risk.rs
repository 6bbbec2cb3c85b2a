//! Mapping from safety score to a discrete risk category.

use std::fmt;

use serde::Serialize;

/// Risk category derived from a safety score.
///
/// Variants are ordered by increasing safety, so `High < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    High,
    Elevated,
    Moderate,
    Low,
}

/// Lower bounds checked from safest to least safe; first match wins.
const THRESHOLDS: [(f64, RiskCategory); 3] = [
    (80.0, RiskCategory::Low),
    (60.0, RiskCategory::Moderate),
    (40.0, RiskCategory::Elevated),
];

/// Classify a safety score.
///
/// Boundary values belong to the safer category. Scores outside 0-100 are
/// classified by the same rule, and NaN falls through to `High`.
pub fn classify(score: f64) -> RiskCategory {
    THRESHOLDS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, category)| *category)
        .unwrap_or(RiskCategory::High)
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [Self::High, Self::Elevated, Self::Moderate, Self::Low];

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::Elevated => "Elevated Risk",
            Self::High => "High Risk",
        }
    }

    /// Short id used as a CSS class.
    pub fn id(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Elevated => "elevated",
            Self::High => "high",
        }
    }

    pub fn color_token(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Moderate => "amber",
            Self::Elevated => "orange",
            Self::High => "red",
        }
    }

    /// Hex tint applied to badges.
    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#28a745",
            Self::Moderate => "#ffc107",
            Self::Elevated => "#fd7e14",
            Self::High => "#dc3545",
        }
    }

    /// Category code exchanged with the REST API.
    pub fn api_code(self) -> &'static str {
        match self {
            Self::Low => "LOW_RISK",
            Self::Moderate => "MODERATE_RISK",
            Self::Elevated => "ELEVATED_RISK",
            Self::High => "HIGH_RISK",
        }
    }

    /// Inclusive lower bound of the category, `None` for the open-ended `High`.
    pub fn min_score(self) -> Option<f64> {
        THRESHOLDS
            .iter()
            .find(|(_, category)| *category == self)
            .map(|(floor, _)| *floor)
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
