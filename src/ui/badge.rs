//! Compact color-coded safety score badge with an optional detail tooltip.

use askama::Template;
use clap::ValueEnum;
use serde::Deserialize;

use super::{
    fixed,
    tooltip::{PointerEvent, Tooltip, TooltipState},
    RenderError,
};
use crate::safety::risk::{classify, RiskCategory};

const TOOLTIP_FOOTNOTE: &str = "Higher scores indicate safer profiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BadgeSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl BadgeSize {
    fn padding(self) -> &'static str {
        match self {
            Self::Sm => "4px 8px",
            Self::Md => "6px 12px",
            Self::Lg => "10px 16px",
        }
    }

    fn font_size(self) -> &'static str {
        match self {
            Self::Sm => "12px",
            Self::Md => "14px",
            Self::Lg => "16px",
        }
    }
}

/// Inputs for a badge.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeProps {
    pub safety_score: f64,
    pub web: f64,
    pub eair: Option<f64>,
    pub show_tooltip: bool,
    pub size: BadgeSize,
}

impl BadgeProps {
    pub fn new(safety_score: f64, web: f64, eair: Option<f64>) -> Self {
        Self {
            safety_score,
            web,
            eair,
            show_tooltip: true,
            size: BadgeSize::default(),
        }
    }

    pub fn size(mut self, size: BadgeSize) -> Self {
        self.size = size;
        self
    }

    pub fn show_tooltip(mut self, show: bool) -> Self {
        self.show_tooltip = show;
        self
    }
}

/// Rows of the tooltip panel, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeDetail {
    pub risk_label: &'static str,
    pub safety_score: String,
    pub web: String,
    pub eair: Option<String>,
}

impl BadgeDetail {
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        let mut rows = vec![
            ("Safety Score", self.safety_score.as_str()),
            ("WEB", self.web.as_str()),
        ];
        if let Some(eair) = &self.eair {
            rows.push(("EAIR", eair.as_str()));
        }
        rows
    }
}

#[derive(Template)]
#[template(path = "badge.html")]
struct BadgeTemplate<'a> {
    category_id: &'a str,
    color: &'a str,
    padding: &'a str,
    font_size: &'a str,
    cursor: &'a str,
    title: &'a str,
    score_text: &'a str,
    detail: Option<&'a BadgeDetail>,
    rows: Vec<(&'a str, &'a str)>,
    footnote: &'a str,
}

/// A single badge instance; owns its tooltip visibility.
#[derive(Debug, Clone)]
pub struct SafetyScoreBadge {
    props: BadgeProps,
    risk: RiskCategory,
    tooltip: Tooltip,
}

impl SafetyScoreBadge {
    pub fn new(props: BadgeProps) -> Self {
        let risk = classify(props.safety_score);
        let tooltip = Tooltip::new(props.show_tooltip);
        Self {
            props,
            risk,
            tooltip,
        }
    }

    pub fn props(&self) -> &BadgeProps {
        &self.props
    }

    pub fn risk(&self) -> RiskCategory {
        self.risk
    }

    pub fn on_pointer_enter(&mut self) -> TooltipState {
        self.tooltip.handle(PointerEvent::Enter)
    }

    pub fn on_pointer_leave(&mut self) -> TooltipState {
        self.tooltip.handle(PointerEvent::Leave)
    }

    pub fn tooltip_state(&self) -> TooltipState {
        self.tooltip.state()
    }

    /// Badge text, e.g. `Safety: 72.4`.
    pub fn label(&self) -> String {
        format!("Safety: {}", fixed(self.props.safety_score, 1))
    }

    /// Plain hover title used in place of the panel when tooltips are off.
    pub fn hover_title(&self) -> Option<String> {
        if self.props.show_tooltip {
            None
        } else {
            Some(format!(
                "Safety Score: {} - {}",
                fixed(self.props.safety_score, 1),
                self.risk.label()
            ))
        }
    }

    pub fn detail(&self) -> BadgeDetail {
        BadgeDetail {
            risk_label: self.risk.label(),
            safety_score: fixed(self.props.safety_score, 2),
            web: fixed(self.props.web, 2),
            eair: self.props.eair.map(|eair| fixed(eair, 4)),
        }
    }

    pub fn render(&self) -> Result<String, RenderError> {
        let title = self.hover_title().unwrap_or_default();
        let score_text = fixed(self.props.safety_score, 1);
        let detail = self.tooltip.is_visible().then(|| self.detail());
        let rows = detail.as_ref().map(BadgeDetail::rows).unwrap_or_default();
        let template = BadgeTemplate {
            category_id: self.risk.id(),
            color: self.risk.color(),
            padding: self.props.size.padding(),
            font_size: self.props.size.font_size(),
            cursor: if self.props.show_tooltip {
                "pointer"
            } else {
                "default"
            },
            title: &title,
            score_text: &score_text,
            detail: detail.as_ref(),
            rows,
            footnote: TOOLTIP_FOOTNOTE,
        };
        Ok(template.render()?)
    }
}
