//! JSON records shaped like the trial-arm REST serializer.

use std::path::Path;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use tracing::warn;

use super::DataError;
use crate::safety::{ArmSafety, SafetyMetrics, TrialArm};

static NCT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^NCT\d{8}$").expect("valid NCT pattern"));

/// Metrics for one data cut as exported upstream. Decimals may be JSON
/// numbers or strings such as `"75.50"`.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct RawSafetyMetrics {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub safety_score: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub web: f64,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub eair: Option<f64>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub n_patients: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub person_years: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub e1_2_count: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub e3_4_count: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub e5_count: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total_ae_count: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub patients_with_any_ae: i64,
    pub data_cut_date: String,
    #[serde(default)]
    pub computation_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrialArm {
    pub arm_name: String,
    pub arm_code: String,
    #[serde(default)]
    pub nct_number: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub latest_safety_metrics: Option<RawSafetyMetrics>,
    /// Full data-cut history; used when no latest cut is given.
    #[serde(default)]
    pub safety_metrics: Vec<RawSafetyMetrics>,
}

pub(super) fn default_status() -> String {
    "ACTIVE".to_string()
}

/// Paginated API page; only `results` is read.
#[derive(Debug, Deserialize)]
struct ArmsPage {
    results: Vec<RawTrialArm>,
}

/// Parse a JSON document holding a bare list of arms, a paginated API page,
/// or a single arm. `origin` is only used for error messages.
///
/// The layout is picked from the top-level shape first, then the text is
/// parsed as that layout so field errors keep their line and column.
pub fn parse_json(text: &str, origin: &Path) -> Result<Vec<TrialArm>, DataError> {
    let json_error = |source| DataError::Json {
        path: origin.to_path_buf(),
        source,
    };
    let shape: Value = serde_json::from_str(text).map_err(json_error)?;
    let raw = match shape {
        Value::Array(_) => {
            serde_json::from_str::<Vec<RawTrialArm>>(text).map_err(json_error)?
        }
        Value::Object(ref fields) if fields.contains_key("results") => {
            serde_json::from_str::<ArmsPage>(text)
                .map_err(json_error)?
                .results
        }
        _ => vec![serde_json::from_str::<RawTrialArm>(text).map_err(json_error)?],
    };
    raw.into_iter().map(RawTrialArm::validate).collect()
}

impl RawTrialArm {
    pub fn validate(self) -> Result<TrialArm, DataError> {
        let nct_number = self
            .nct_number
            .map(|nct| nct.trim().to_string())
            .filter(|nct| !nct.is_empty());
        if let Some(nct) = &nct_number {
            if !NCT_PATTERN.is_match(nct) {
                warn!(arm = %self.arm_code, nct = %nct, "NCT number does not match NCTnnnnnnnn");
            }
        }

        let history = newest_first(self.safety_metrics)
            .into_iter()
            .map(|raw| raw.validate(&self.arm_code))
            .collect::<Result<Vec<_>, _>>()?;
        let latest = match self.latest_safety_metrics {
            Some(raw) => Some(raw.validate(&self.arm_code)?),
            None => history.first().cloned(),
        };
        let safety = match latest {
            Some(metrics) => ArmSafety::Computed(metrics),
            None => ArmSafety::Pending,
        };

        Ok(TrialArm {
            arm_name: self.arm_name,
            arm_code: self.arm_code,
            nct_number,
            status: self.status,
            safety,
            history,
        })
    }
}

/// Order cuts by `data_cut_date`, latest first. ISO dates are compared as
/// dates; unparseable labels sort after every parseable one.
pub fn newest_first(mut cuts: Vec<RawSafetyMetrics>) -> Vec<RawSafetyMetrics> {
    cuts.sort_by(|a, b| cut_order(&b.data_cut_date).cmp(&cut_order(&a.data_cut_date)));
    cuts
}

/// Sort key for a data-cut label.
pub fn cut_order(label: &str) -> (Option<NaiveDate>, &str) {
    let label = label.trim();
    (NaiveDate::parse_from_str(label, "%Y-%m-%d").ok(), label)
}

impl RawSafetyMetrics {
    pub fn validate(self, arm_code: &str) -> Result<SafetyMetrics, DataError> {
        let n_patients = count(arm_code, "n_patients", self.n_patients)?;
        let patients_with_any_ae =
            count(arm_code, "patients_with_any_ae", self.patients_with_any_ae)?;
        if patients_with_any_ae > n_patients {
            return Err(invalid(
                arm_code,
                "patients_with_any_ae",
                format!("{patients_with_any_ae} exceeds n_patients {n_patients}"),
            ));
        }
        if n_patients == 0 {
            warn!(arm = %arm_code, "arm reports zero patients; percentages will be unavailable");
        }

        Ok(SafetyMetrics {
            safety_score: finite(arm_code, "safety_score", self.safety_score)?,
            web: non_negative(arm_code, "web", self.web)?,
            eair: self
                .eair
                .map(|eair| non_negative(arm_code, "eair", eair))
                .transpose()?,
            n_patients,
            person_years: non_negative(arm_code, "person_years", self.person_years)?,
            e1_2_count: count(arm_code, "e1_2_count", self.e1_2_count)?,
            e3_4_count: count(arm_code, "e3_4_count", self.e3_4_count)?,
            e5_count: count(arm_code, "e5_count", self.e5_count)?,
            total_ae_count: count(arm_code, "total_ae_count", self.total_ae_count)?,
            patients_with_any_ae,
            data_cut_date: self.data_cut_date,
            computation_date: self.computation_date,
        })
    }
}

fn invalid(arm_code: &str, field: &'static str, reason: String) -> DataError {
    DataError::Invalid {
        arm_code: arm_code.to_string(),
        field,
        reason,
    }
}

fn count(arm_code: &str, field: &'static str, value: i64) -> Result<u32, DataError> {
    u32::try_from(value).map_err(|_| invalid(arm_code, field, format!("{value} is not a count")))
}

fn finite(arm_code: &str, field: &'static str, value: f64) -> Result<f64, DataError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(arm_code, field, format!("{value} is not finite")))
    }
}

fn non_negative(arm_code: &str, field: &'static str, value: f64) -> Result<f64, DataError> {
    let value = finite(arm_code, field, value)?;
    if value < 0.0 {
        return Err(invalid(arm_code, field, format!("{value} is negative")));
    }
    Ok(value)
}
