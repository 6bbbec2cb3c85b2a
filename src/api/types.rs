//! Shared DTOs for JSON responses.

use serde::Serialize;

use crate::{
    safety::{risk::classify, SafetyMetrics, TrialArm},
    ui::fixed,
};

/// Trial arm with its latest metrics flattened and display strings added.
/// Metric fields are null for arms still awaiting safety data.
#[derive(Debug, Clone, Serialize)]
pub struct TrialArmDto {
    pub arm_name: String,
    pub arm_code: String,
    pub nct_number: Option<String>,
    pub status: String,
    pub safety_score: Option<f64>,
    pub safety_score_display: Option<String>,
    pub safety_category: Option<&'static str>,
    pub web: Option<f64>,
    pub web_display: Option<String>,
    pub eair: Option<f64>,
    pub eair_display: Option<String>,
    pub n_patients: Option<u32>,
    pub data_cut_date: Option<String>,
}

impl From<&TrialArm> for TrialArmDto {
    fn from(arm: &TrialArm) -> Self {
        let metrics = arm.metrics();
        TrialArmDto {
            arm_name: arm.arm_name.clone(),
            arm_code: arm.arm_code.clone(),
            nct_number: arm.nct_number.clone(),
            status: arm.status.clone(),
            safety_score: metrics.map(|m| m.safety_score),
            safety_score_display: metrics.map(|m| fixed(m.safety_score, 2)),
            safety_category: metrics.map(|m| classify(m.safety_score).api_code()),
            web: metrics.map(|m| m.web),
            web_display: metrics.map(|m| fixed(m.web, 2)),
            eair: metrics.and_then(|m| m.eair),
            eair_display: metrics.map(|m| match m.eair {
                Some(eair) => fixed(eair, 4),
                None => "N/A".to_string(),
            }),
            n_patients: metrics.map(|m| m.n_patients),
            data_cut_date: metrics.map(|m| m.data_cut_date.clone()),
        }
    }
}

/// One data cut of an arm's safety history.
#[derive(Debug, Clone, Serialize)]
pub struct SafetyMetricsDto {
    pub data_cut_date: String,
    pub computation_date: String,
    pub safety_score: f64,
    pub safety_score_display: String,
    pub safety_category: &'static str,
    pub web: f64,
    pub web_display: String,
    pub eair: Option<f64>,
    pub eair_display: String,
    pub n_patients: u32,
    pub person_years: f64,
    pub e1_2_count: u32,
    pub e3_4_count: u32,
    pub e5_count: u32,
    pub total_ae_count: u32,
    pub patients_with_any_ae: u32,
}

impl From<&SafetyMetrics> for SafetyMetricsDto {
    fn from(m: &SafetyMetrics) -> Self {
        SafetyMetricsDto {
            data_cut_date: m.data_cut_date.clone(),
            computation_date: m.computation_date.clone(),
            safety_score: m.safety_score,
            safety_score_display: fixed(m.safety_score, 2),
            safety_category: classify(m.safety_score).api_code(),
            web: m.web,
            web_display: fixed(m.web, 2),
            eair: m.eair,
            eair_display: m.eair.map_or_else(|| "N/A".to_string(), |eair| fixed(eair, 4)),
            n_patients: m.n_patients,
            person_years: m.person_years,
            e1_2_count: m.e1_2_count,
            e3_4_count: m.e3_4_count,
            e5_count: m.e5_count,
            total_ae_count: m.total_ae_count,
            patients_with_any_ae: m.patients_with_any_ae,
        }
    }
}

/// One page of a listing, in the upstream REST pagination shape.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
    pub results: Vec<T>,
}
