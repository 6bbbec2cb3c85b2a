//! HTTP route handlers for Axum.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use strsim::jaro_winkler;
use tracing::{error, warn};

use crate::{
    api::types::{Page, SafetyMetricsDto, TrialArmDto},
    safety::TrialArm,
    ui::{
        badge::{BadgeProps, BadgeSize, SafetyScoreBadge},
        card::TrialArmSafetyCard,
        dashboard::render_dashboard,
        RenderError,
    },
};

use super::AppState;

type ApiResult<T> = Result<T, (StatusCode, String)>;

const SUGGESTION_THRESHOLD: f64 = 0.85;

#[derive(Debug, Default, Deserialize)]
pub struct ArmQuery {
    pub status: Option<String>,
    pub nct_number: Option<String>,
    pub min_safety_score: Option<f64>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ArmQuery {
    fn matches(&self, arm: &TrialArm) -> bool {
        if let Some(status) = &self.status {
            if !arm.status.eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(nct) = &self.nct_number {
            if arm.nct_number.as_deref() != Some(nct.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_safety_score {
            return arm.safety_score().is_some_and(|score| score >= min);
        }
        true
    }
}

#[derive(Debug, Deserialize)]
pub struct BadgeQuery {
    pub safety_score: f64,
    pub web: f64,
    pub eair: Option<f64>,
    pub size: Option<BadgeSize>,
    pub show_tooltip: Option<bool>,
    /// Render as if the pointer were over the badge.
    pub hover: Option<bool>,
}

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Html<String>> {
    render_dashboard("Trial Arm Safety", &state.arms)
        .map(Html)
        .map_err(internal)
}

pub async fn list_arms(
    State(state): State<AppState>,
    Query(query): Query<ArmQuery>,
) -> ApiResult<Json<Page<TrialArmDto>>> {
    let matching: Vec<&TrialArm> = state.arms.iter().filter(|arm| query.matches(arm)).collect();
    let page_size = state.settings.page_size_for(query.page_size);
    let page = query.page.unwrap_or(1).max(1);
    let results = matching
        .iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .map(|arm| TrialArmDto::from(*arm))
        .collect();
    Ok(Json(Page {
        count: matching.len(),
        page,
        page_size,
        results,
    }))
}

pub async fn get_arm(
    Path(arm_code): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<TrialArmDto>> {
    let arm = find_arm(&state.arms, &arm_code)?;
    Ok(Json(TrialArmDto::from(arm)))
}

/// Every data cut for one arm, latest first.
pub async fn safety_metrics(
    Path(arm_code): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SafetyMetricsDto>>> {
    let arm = find_arm(&state.arms, &arm_code)?;
    Ok(Json(arm.cuts().into_iter().map(SafetyMetricsDto::from).collect()))
}

pub async fn arm_card(
    Path(arm_code): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Html<String>> {
    let arm = find_arm(&state.arms, &arm_code)?;
    TrialArmSafetyCard::new(arm)
        .render()
        .map(Html)
        .map_err(internal)
}

pub async fn badge(Query(query): Query<BadgeQuery>) -> ApiResult<Html<String>> {
    let props = BadgeProps::new(query.safety_score, query.web, query.eair)
        .size(query.size.unwrap_or_default())
        .show_tooltip(query.show_tooltip.unwrap_or(true));
    let mut badge = SafetyScoreBadge::new(props);
    if query.hover.unwrap_or(false) {
        badge.on_pointer_enter();
    }
    badge.render().map(Html).map_err(internal)
}

fn find_arm<'a>(arms: &'a [TrialArm], arm_code: &str) -> Result<&'a TrialArm, (StatusCode, String)> {
    if let Some(arm) = arms
        .iter()
        .find(|arm| arm.arm_code.eq_ignore_ascii_case(arm_code))
    {
        return Ok(arm);
    }
    warn!(%arm_code, "unknown trial arm requested");
    let message = match suggest_code(arms, arm_code) {
        Some(code) => format!("unknown trial arm {arm_code}; did you mean {code}?"),
        None => format!("unknown trial arm {arm_code}"),
    };
    Err((StatusCode::NOT_FOUND, message))
}

/// Closest known arm code by Jaro-Winkler similarity, if close enough.
pub fn suggest_code<'a>(arms: &'a [TrialArm], arm_code: &str) -> Option<&'a str> {
    let wanted = arm_code.to_ascii_uppercase();
    arms.iter()
        .map(|arm| {
            let score = jaro_winkler(&arm.arm_code.to_ascii_uppercase(), &wanted);
            (arm.arm_code.as_str(), score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(code, _)| code)
}

fn internal(err: RenderError) -> (StatusCode, String) {
    error!(%err, "rendering failed");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
