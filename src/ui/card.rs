//! Per-arm safety card: badge, headline metrics and adverse-event breakdown.

use std::fmt;

use askama::Template;
use tracing::{debug, warn};

use super::{
    badge::{BadgeProps, BadgeSize, SafetyScoreBadge},
    fixed, percent_label, RenderError,
};
use crate::safety::{
    events::{summarize, AdverseEventSummary, GradeRow},
    SafetyMetrics, TrialArm,
};

pub const NO_DATA_NOTICE: &str = "Safety data not yet available";

/// Invoked with the full arm when a card is activated.
pub type SelectCallback<'a> = Box<dyn FnMut(&TrialArm) + 'a>;

struct GradeRowView {
    label: &'static str,
    css_class: &'static str,
    count_text: String,
    bar_class: &'static str,
    bar_width: String,
}

impl GradeRowView {
    fn from_row(row: &GradeRow) -> Self {
        let (bar_class, bar_width) = if row.is_valid() {
            ("ae-bar", fixed(row.bar_width, 1))
        } else {
            ("ae-bar invalid", fixed(0.0, 1))
        };
        Self {
            label: row.bucket.label(),
            css_class: row.bucket.css_class(),
            count_text: format!("{} pts ({})", row.count, percent_label(row.percentage)),
            bar_class,
            bar_width,
        }
    }
}

#[derive(Template)]
#[template(path = "card_pending.html")]
struct PendingCardTemplate<'a> {
    arm_name: &'a str,
    arm_code: &'a str,
    notice: &'a str,
}

#[derive(Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    arm_name: &'a str,
    arm_code: &'a str,
    nct_number: Option<&'a str>,
    status: &'a str,
    status_class: String,
    badge_html: String,
    n_patients: u32,
    person_years: String,
    data_cut_date: &'a str,
    rows: Vec<GradeRowView>,
    total_ae_count: u32,
    patients_with_any_ae: u32,
    any_ae_percent: String,
    web: String,
    computation_date: &'a str,
}

/// Card for one trial arm.
///
/// Arms without computed metrics render a fixed notice and are not
/// activation targets.
pub struct TrialArmSafetyCard<'a> {
    arm: &'a TrialArm,
    badge: Option<SafetyScoreBadge>,
    on_select: Option<SelectCallback<'a>>,
}

impl fmt::Debug for TrialArmSafetyCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrialArmSafetyCard")
            .field("arm_code", &self.arm.arm_code)
            .field("badge", &self.badge)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl<'a> TrialArmSafetyCard<'a> {
    pub fn new(arm: &'a TrialArm) -> Self {
        let badge = arm.metrics().map(|m| {
            SafetyScoreBadge::new(BadgeProps::new(m.safety_score, m.web, m.eair).size(BadgeSize::Lg))
        });
        Self {
            arm,
            badge,
            on_select: None,
        }
    }

    pub fn on_select(mut self, callback: impl FnMut(&TrialArm) + 'a) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn arm(&self) -> &TrialArm {
        self.arm
    }

    /// Embedded badge, present only when metrics exist.
    pub fn badge(&self) -> Option<&SafetyScoreBadge> {
        self.badge.as_ref()
    }

    pub fn badge_mut(&mut self) -> Option<&mut SafetyScoreBadge> {
        self.badge.as_mut()
    }

    /// Handle a click on the card. Returns whether a callback ran.
    pub fn activate(&mut self) -> bool {
        if self.arm.metrics().is_none() {
            return false;
        }
        match self.on_select.as_mut() {
            Some(callback) => {
                callback(self.arm);
                true
            }
            None => false,
        }
    }

    pub fn render(&self) -> Result<String, RenderError> {
        match (self.arm.metrics(), self.badge.as_ref()) {
            (Some(metrics), Some(badge)) => self.render_computed(metrics, badge),
            _ => self.render_pending(),
        }
    }

    fn render_pending(&self) -> Result<String, RenderError> {
        debug!(arm = %self.arm.arm_code, "rendering pending safety card");
        let template = PendingCardTemplate {
            arm_name: &self.arm.arm_name,
            arm_code: &self.arm.arm_code,
            notice: NO_DATA_NOTICE,
        };
        Ok(template.render()?)
    }

    fn render_computed(
        &self,
        metrics: &SafetyMetrics,
        badge: &SafetyScoreBadge,
    ) -> Result<String, RenderError> {
        let summary: AdverseEventSummary = summarize(metrics);
        if summary.has_invalid_percentages() {
            warn!(
                arm = %self.arm.arm_code,
                n_patients = metrics.n_patients,
                "adverse event percentages unavailable for arm"
            );
        }
        let template = CardTemplate {
            arm_name: &self.arm.arm_name,
            arm_code: &self.arm.arm_code,
            nct_number: self.arm.nct_number.as_deref(),
            status: &self.arm.status,
            status_class: self.arm.status.to_lowercase(),
            badge_html: badge.render()?,
            n_patients: metrics.n_patients,
            person_years: fixed(metrics.person_years, 1),
            data_cut_date: &metrics.data_cut_date,
            rows: summary.rows.iter().map(GradeRowView::from_row).collect(),
            total_ae_count: summary.total_ae_count,
            patients_with_any_ae: summary.patients_with_any_ae,
            any_ae_percent: percent_label(summary.any_ae_percentage),
            web: fixed(summary.web, 2),
            computation_date: &metrics.computation_date,
        };
        Ok(template.render()?)
    }
}
