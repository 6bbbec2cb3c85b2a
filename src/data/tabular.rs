//! Flat CSV exports, one row per arm.

use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use super::{
    arms::{default_status, RawSafetyMetrics, RawTrialArm},
    DataError,
};
use crate::safety::TrialArm;

/// One CSV row. An empty `safety_score` marks an arm without metrics.
#[derive(Debug, Deserialize)]
struct FlatArmRow {
    arm_name: String,
    arm_code: String,
    nct_number: Option<String>,
    status: Option<String>,
    safety_score: Option<f64>,
    web: Option<f64>,
    eair: Option<f64>,
    n_patients: Option<i64>,
    person_years: Option<f64>,
    e1_2_count: Option<i64>,
    e3_4_count: Option<i64>,
    e5_count: Option<i64>,
    total_ae_count: Option<i64>,
    patients_with_any_ae: Option<i64>,
    data_cut_date: Option<String>,
    computation_date: Option<String>,
}

pub fn read_csv(path: &Path) -> Result<Vec<TrialArm>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut arms = Vec::new();
    for result in reader.deserialize::<FlatArmRow>() {
        let row = result.map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        arms.push(row.into_raw()?.validate()?);
    }
    Ok(arms)
}

impl FlatArmRow {
    fn into_raw(self) -> Result<RawTrialArm, DataError> {
        let latest_safety_metrics = match self.safety_score {
            Some(safety_score) => {
                let code = self.arm_code.as_str();
                Some(RawSafetyMetrics {
                    safety_score,
                    web: required(code, "web", self.web)?,
                    eair: self.eair,
                    n_patients: required(code, "n_patients", self.n_patients)?,
                    person_years: required(code, "person_years", self.person_years)?,
                    e1_2_count: required(code, "e1_2_count", self.e1_2_count)?,
                    e3_4_count: required(code, "e3_4_count", self.e3_4_count)?,
                    e5_count: required(code, "e5_count", self.e5_count)?,
                    total_ae_count: required(code, "total_ae_count", self.total_ae_count)?,
                    patients_with_any_ae: required(
                        code,
                        "patients_with_any_ae",
                        self.patients_with_any_ae,
                    )?,
                    data_cut_date: required(code, "data_cut_date", self.data_cut_date)?,
                    computation_date: self.computation_date.unwrap_or_default(),
                })
            }
            None => None,
        };
        Ok(RawTrialArm {
            arm_name: self.arm_name,
            arm_code: self.arm_code,
            nct_number: self.nct_number,
            status: self.status.unwrap_or_else(default_status),
            latest_safety_metrics,
            safety_metrics: Vec::new(),
        })
    }
}

fn required<T>(arm_code: &str, field: &'static str, value: Option<T>) -> Result<T, DataError> {
    value.ok_or_else(|| DataError::Invalid {
        arm_code: arm_code.to_string(),
        field,
        reason: "missing value".to_string(),
    })
}
