//! Full HTML page listing every arm's card, grouped by trial registration.

use askama::Template;
use indexmap::IndexMap;

use super::{card::TrialArmSafetyCard, RenderError};
use crate::safety::TrialArm;

const UNREGISTERED: &str = "Unregistered trials";

struct CardEntry {
    href: String,
    html: String,
}

struct TrialGroup<'a> {
    heading: &'a str,
    cards: Vec<CardEntry>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    title: &'a str,
    arm_count: usize,
    pending_count: usize,
    groups: Vec<TrialGroup<'a>>,
}

/// Link to the standalone card of an arm.
pub fn card_href(arm_code: &str) -> String {
    format!("/trial-arms/{}/card", urlencoding::encode(arm_code))
}

/// Group arms by NCT number, keeping the order in which trials first appear.
pub fn group_by_trial(arms: &[TrialArm]) -> IndexMap<&str, Vec<&TrialArm>> {
    let mut groups: IndexMap<&str, Vec<&TrialArm>> = IndexMap::new();
    for arm in arms {
        let key = arm.nct_number.as_deref().unwrap_or(UNREGISTERED);
        groups.entry(key).or_default().push(arm);
    }
    groups
}

pub fn render_dashboard(title: &str, arms: &[TrialArm]) -> Result<String, RenderError> {
    let mut groups = Vec::new();
    for (heading, members) in group_by_trial(arms) {
        let cards = members
            .into_iter()
            .map(|arm| -> Result<CardEntry, RenderError> {
                Ok(CardEntry {
                    href: card_href(&arm.arm_code),
                    html: TrialArmSafetyCard::new(arm).render()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        groups.push(TrialGroup { heading, cards });
    }

    let template = DashboardTemplate {
        title,
        arm_count: arms.len(),
        pending_count: arms.iter().filter(|arm| arm.metrics().is_none()).count(),
        groups,
    };
    Ok(template.render()?)
}
