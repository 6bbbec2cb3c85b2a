//! Trial arm safety records and the derivations computed from them.

pub mod events;
pub mod risk;

use serde::Serialize;

/// Safety metrics for one trial arm at one data cut.
///
/// Values arrive already computed; this crate only classifies and
/// displays them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyMetrics {
    /// Overall safety score, nominally 0-100 with higher meaning safer.
    pub safety_score: f64,
    /// Weighted Event Burden.
    pub web: f64,
    /// Event-Adjusted Incidence Rate, absent when it could not be computed.
    pub eair: Option<f64>,
    pub n_patients: u32,
    pub person_years: f64,
    /// Patients whose worst adverse event was grade 1-2.
    pub e1_2_count: u32,
    /// Patients whose worst adverse event was grade 3-4.
    pub e3_4_count: u32,
    /// Patients with a grade 5 (fatal) adverse event.
    pub e5_count: u32,
    /// Total adverse events across all patients and grades.
    pub total_ae_count: u32,
    pub patients_with_any_ae: u32,
    pub data_cut_date: String,
    pub computation_date: String,
}

/// Whether safety metrics have been computed for an arm yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ArmSafety {
    Computed(SafetyMetrics),
    Pending,
}

impl ArmSafety {
    pub fn metrics(&self) -> Option<&SafetyMetrics> {
        match self {
            Self::Computed(metrics) => Some(metrics),
            Self::Pending => None,
        }
    }
}

/// One treatment or control branch of a clinical trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialArm {
    pub arm_name: String,
    pub arm_code: String,
    pub nct_number: Option<String>,
    pub status: String,
    pub safety: ArmSafety,
    /// Every supplied data cut, latest first. Empty when only the latest cut was
    /// supplied.
    pub history: Vec<SafetyMetrics>,
}

impl TrialArm {
    pub fn metrics(&self) -> Option<&SafetyMetrics> {
        self.safety.metrics()
    }

    /// Every known data cut, latest first.
    pub fn cuts(&self) -> Vec<&SafetyMetrics> {
        if self.history.is_empty() {
            self.metrics().into_iter().collect()
        } else {
            self.history.iter().collect()
        }
    }

    /// Latest safety score, if metrics exist.
    pub fn safety_score(&self) -> Option<f64> {
        self.metrics().map(|m| m.safety_score)
    }
}
