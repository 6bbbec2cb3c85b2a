use proptest::prelude::*;
use trial_safety_view::safety::{
    events::{
        bar_width, checked_percentage, percentage, raw_percentage, summarize, GradeBucket, SummaryError,
        FATAL_BAR_FLOOR,
    },
    SafetyMetrics,
};

fn metrics(n_patients: u32) -> SafetyMetrics {
    SafetyMetrics {
        safety_score: 72.4,
        web: 146.0,
        eair: Some(0.35),
        n_patients,
        person_years: 120.5,
        e1_2_count: 20,
        e3_4_count: 6,
        e5_count: 1,
        total_ae_count: 57,
        patients_with_any_ae: 27,
        data_cut_date: "2024-03-31".into(),
        computation_date: "2024-04-02".into(),
    }
}

#[test]
fn percentage_rounds_to_one_decimal() {
    assert_eq!(percentage(25, 100), 25.0);
    assert_eq!(percentage(1, 3), 33.3);
    assert_eq!(percentage(2, 3), 66.7);
    assert_eq!(percentage(0, 12), 0.0);
}

#[test]
fn zero_total_is_never_a_plausible_percentage() {
    assert!(percentage(0, 0).is_nan());
    assert!(!percentage(4, 0).is_finite());
    assert_eq!(checked_percentage(4, 0), Err(SummaryError::NoPatients));
    assert_eq!(checked_percentage(1, 4), Ok(25.0));
}

#[test]
fn fatal_bar_has_visibility_floor() {
    assert_eq!(bar_width(0.0), 0.0);
    assert_eq!(bar_width(0.8), 5.0);
    assert_eq!(bar_width(12.3), 12.3);
    assert!(bar_width(f64::NAN).is_nan());
}

#[test]
fn floor_only_applies_to_fatal_bucket() {
    assert_eq!(GradeBucket::MildModerate.bar_width(0.8), 0.8);
    assert_eq!(GradeBucket::Severe.bar_width(0.8), 0.8);
    assert_eq!(GradeBucket::Fatal.bar_width(0.8), 5.0);
}

#[test]
fn summary_has_one_row_per_bucket() {
    let summary = summarize(&metrics(40));
    let buckets: Vec<_> = summary.rows.iter().map(|row| row.bucket).collect();
    assert_eq!(buckets, GradeBucket::ALL.to_vec());

    assert_eq!(summary.rows[0].percentage, 50.0);
    assert_eq!(summary.rows[0].bar_width, 50.0);
    assert_eq!(summary.rows[1].percentage, 15.0);
    assert_eq!(summary.rows[2].percentage, 2.5);
    assert_eq!(summary.rows[2].bar_width, FATAL_BAR_FLOOR);
    assert_eq!(summary.any_ae_percentage, 67.5);
    assert_eq!(summary.total_ae_count, 57);
    assert!(!summary.has_invalid_percentages());
}

#[test]
fn fatal_floor_uses_unrounded_share() {
    assert_eq!(percentage(1, 5000), 0.0);
    assert!(raw_percentage(1, 5000) > 0.0);

    let summary = summarize(&metrics(5000));
    let fatal = &summary.rows[2];
    assert_eq!(fatal.bucket, GradeBucket::Fatal);
    assert_eq!(fatal.percentage, 0.0);
    assert_eq!(fatal.bar_width, FATAL_BAR_FLOOR);
}

#[test]
fn zero_patients_marks_summary_invalid() {
    let mut zero = metrics(0);
    zero.e1_2_count = 0;
    zero.e3_4_count = 0;
    zero.e5_count = 0;
    zero.patients_with_any_ae = 0;
    let summary = summarize(&zero);
    assert!(summary.has_invalid_percentages());
    assert!(summary.rows.iter().all(|row| !row.is_valid()));
}

proptest! {
    #[test]
    fn nonzero_fatal_bar_is_at_least_floor(pct in 0.01f64..100.0) {
        let width = bar_width(pct);
        prop_assert!(width >= FATAL_BAR_FLOOR);
        prop_assert!(width >= pct);
    }

    #[test]
    fn percentage_stays_in_range(total in 1u32..10_000, share in 0.0f64..=1.0) {
        let count = (f64::from(total) * share) as u32;
        let pct = percentage(count, total);
        prop_assert!((0.0..=100.0).contains(&pct));
    }
}
