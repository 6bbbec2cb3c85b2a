//! Adverse-event percentages and bar proportions for the grade breakdown.

use serde::Serialize;
use thiserror::Error;

use super::SafetyMetrics;

/// Smallest width, in percent, drawn for a nonzero fatal-event bar.
pub const FATAL_BAR_FLOOR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("cannot compute a percentage of zero patients")]
    NoPatients,
}

/// `100 * count / total` without rounding.
pub fn raw_percentage(count: u32, total: u32) -> f64 {
    100.0 * f64::from(count) / f64::from(total)
}

/// `100 * count / total`, rounded to one decimal.
///
/// A zero `total` is a caller precondition violation and yields a
/// non-finite value rather than a misleading zero.
pub fn percentage(count: u32, total: u32) -> f64 {
    (raw_percentage(count, total) * 10.0).round() / 10.0
}

/// Same as [`percentage`] but reports a zero denominator as an error.
pub fn checked_percentage(count: u32, total: u32) -> Result<f64, SummaryError> {
    if total == 0 {
        return Err(SummaryError::NoPatients);
    }
    Ok(percentage(count, total))
}

/// Width of the fatal-event bar: zero stays zero, anything else is at least
/// [`FATAL_BAR_FLOOR`]. Non-finite input is passed through untouched.
pub fn bar_width(percentage: f64) -> f64 {
    if percentage == 0.0 || !percentage.is_finite() {
        percentage
    } else {
        percentage.max(FATAL_BAR_FLOOR)
    }
}

/// Worst-grade buckets shown in the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBucket {
    MildModerate,
    Severe,
    Fatal,
}

impl GradeBucket {
    pub const ALL: [GradeBucket; 3] = [Self::MildModerate, Self::Severe, Self::Fatal];

    pub fn label(self) -> &'static str {
        match self {
            Self::MildModerate => "Grade 1-2 (Mild-Moderate)",
            Self::Severe => "Grade 3-4 (Severe)",
            Self::Fatal => "Grade 5 (Fatal)",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::MildModerate => "grade-1-2",
            Self::Severe => "grade-3-4",
            Self::Fatal => "grade-5",
        }
    }

    pub fn count(self, metrics: &SafetyMetrics) -> u32 {
        match self {
            Self::MildModerate => metrics.e1_2_count,
            Self::Severe => metrics.e3_4_count,
            Self::Fatal => metrics.e5_count,
        }
    }

    /// Bar width for a bucket; only the fatal bucket gets the visibility floor.
    pub fn bar_width(self, percentage: f64) -> f64 {
        match self {
            Self::Fatal => bar_width(percentage),
            Self::MildModerate | Self::Severe => percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRow {
    pub bucket: GradeBucket,
    pub count: u32,
    /// Rounded to one decimal for display.
    pub percentage: f64,
    /// Taken from the unrounded ratio, so a fatal rate that rounds to 0.0
    /// still gets the visibility floor.
    pub bar_width: f64,
}

impl GradeRow {
    /// False when the percentage could not be computed (zero patients).
    pub fn is_valid(&self) -> bool {
        self.percentage.is_finite()
    }
}

/// Adverse-event profile for one arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdverseEventSummary {
    pub rows: Vec<GradeRow>,
    pub total_ae_count: u32,
    pub patients_with_any_ae: u32,
    pub any_ae_percentage: f64,
    pub web: f64,
}

impl AdverseEventSummary {
    pub fn has_invalid_percentages(&self) -> bool {
        !self.any_ae_percentage.is_finite() || self.rows.iter().any(|row| !row.is_valid())
    }
}

pub fn summarize(metrics: &SafetyMetrics) -> AdverseEventSummary {
    let total = metrics.n_patients;
    let rows = GradeBucket::ALL
        .iter()
        .map(|bucket| {
            let count = bucket.count(metrics);
            GradeRow {
                bucket: *bucket,
                count,
                percentage: percentage(count, total),
                bar_width: bucket.bar_width(raw_percentage(count, total)),
            }
        })
        .collect();

    AdverseEventSummary {
        rows,
        total_ae_count: metrics.total_ae_count,
        patients_with_any_ae: metrics.patients_with_any_ae,
        any_ae_percentage: percentage(metrics.patients_with_any_ae, total),
        web: metrics.web,
    }
}
