use super::common::*;
use crate::workflows::priority::domain::{FinancingStatus, Sentiment};
use crate::workflows::priority::risk::{
    calculate_delivery_delay_score, calculate_financing_score, calculate_risk_score,
    calculate_sentiment_score, calculate_stagnation_score, RiskFactorKind, RiskLevel,
    RiskScoringConfig,
};
use chrono::Duration;

#[test]
fn quiet_order_scores_zero() {
    let score = calculate_risk_score(&base_order("quiet"), &config(), now());

    assert_eq!(score.value, 0);
    assert_eq!(score.level, RiskLevel::Low);
    assert!(score.factors.is_empty());
}

#[test]
fn financing_pending_five_days_adds_eighteen() {
    let order = pending_financing_order("fin-5", 5);

    let factor = calculate_financing_score(&order, 2, now());

    assert_eq!(factor.factor, RiskFactorKind::Financing);
    assert_eq!(factor.impact, 18);
}

#[test]
fn financing_at_threshold_is_inactive_and_long_waits_cap() {
    assert_eq!(
        calculate_financing_score(&pending_financing_order("fin-2", 2), 2, now()).impact,
        0
    );
    assert_eq!(
        calculate_financing_score(&pending_financing_order("fin-10", 10), 2, now()).impact,
        30
    );
}

#[test]
fn settled_financing_never_adds_risk() {
    for status in [FinancingStatus::Cash, FinancingStatus::Approved] {
        let mut order = pending_financing_order("settled", 30);
        order.financing_status = status;

        let factor = calculate_financing_score(&order, 2, now());

        assert_eq!(factor.impact, 0, "{status:?} should not add risk");
    }
}

#[test]
fn future_delivery_date_adds_no_delay() {
    let mut order = base_order("future");
    order.expected_delivery_date = Some(now() + Duration::days(4));

    assert_eq!(calculate_delivery_delay_score(&order, now()).impact, 0);
}

#[test]
fn delivery_delay_scales_per_day_and_caps() {
    assert_eq!(
        calculate_delivery_delay_score(&late_order("late-3", 3, None), now()).impact,
        12
    );
    assert_eq!(
        calculate_delivery_delay_score(&late_order("late-5", 5, None), now()).impact,
        20
    );
    assert_eq!(
        calculate_delivery_delay_score(&late_order("late-9", 9, None), now()).impact,
        20
    );
}

#[test]
fn delivery_hours_late_counts_no_whole_day() {
    let mut order = base_order("hours-late");
    order.expected_delivery_date = Some(now() - Duration::hours(10));

    assert!(order.delivery_overdue(now()));
    assert_eq!(calculate_delivery_delay_score(&order, now()).impact, 0);
}

#[test]
fn missing_delivery_date_is_inactive() {
    let factor = calculate_delivery_delay_score(&base_order("no-date"), now());

    assert_eq!(factor.impact, 0);
    assert!(factor.description.contains("no delivery date"));
}

#[test]
fn negative_latest_sentiment_adds_fifteen() {
    let mut order = base_order("negative");
    order.activities = vec![
        activity("older", 48, Some(Sentiment::Positive)),
        activity("latest", 2, Some(Sentiment::Negative)),
    ];

    assert_eq!(calculate_sentiment_score(&order).impact, 15);
}

#[test]
fn newer_positive_sentiment_supersedes_negative() {
    let mut order = base_order("recovered");
    order.activities = vec![
        activity("latest", 1, Some(Sentiment::Positive)),
        activity("complaint", 72, Some(Sentiment::Negative)),
    ];

    assert_eq!(calculate_sentiment_score(&order).impact, 0);
}

#[test]
fn activities_without_sentiment_do_not_supersede() {
    let mut order = base_order("note-after-complaint");
    order.activities = vec![
        activity("complaint", 24, Some(Sentiment::Negative)),
        activity("note", 1, None),
    ];

    assert_eq!(calculate_sentiment_score(&order).impact, 15);
}

#[test]
fn neutral_or_absent_sentiment_is_inactive() {
    let mut order = base_order("neutral");
    assert_eq!(calculate_sentiment_score(&order).impact, 0);

    order.activities.push(activity("meh", 3, Some(Sentiment::Neutral)));
    assert_eq!(calculate_sentiment_score(&order).impact, 0);
}

#[test]
fn stagnation_requires_age_and_idle_time() {
    let mut order = base_order("stale");
    order.created_at = Some(days_ago(20));
    order.updated_at = Some(days_ago(9));
    assert_eq!(calculate_stagnation_score(&order, now()).impact, 4);

    order.created_at = Some(days_ago(14));
    order.updated_at = Some(days_ago(5));
    assert_eq!(calculate_stagnation_score(&order, now()).impact, 2);

    order.created_at = Some(days_ago(13));
    order.updated_at = Some(days_ago(10));
    assert_eq!(calculate_stagnation_score(&order, now()).impact, 0);

    order.created_at = Some(days_ago(30));
    order.updated_at = Some(days_ago(4));
    assert_eq!(calculate_stagnation_score(&order, now()).impact, 0);

    order.created_at = Some(days_ago(90));
    order.updated_at = Some(days_ago(40));
    assert_eq!(calculate_stagnation_score(&order, now()).impact, 10);
}

#[test]
fn composite_score_sorts_factors_with_stable_ties() {
    let score = calculate_risk_score(&high_risk_order("composite"), &config(), now());

    assert_eq!(score.value, 63);
    assert_eq!(score.level, RiskLevel::High);
    let kinds: Vec<RiskFactorKind> = score.factors.iter().map(|f| f.factor).collect();
    assert_eq!(
        kinds,
        vec![
            RiskFactorKind::Silence,
            RiskFactorKind::Sentiment,
            RiskFactorKind::Financing,
            RiskFactorKind::Delay,
        ]
    );
    let impacts: Vec<u8> = score.factors.iter().map(|f| f.impact).collect();
    assert_eq!(impacts, vec![24, 15, 12, 12]);
}

#[test]
fn every_signal_maxed_reaches_one_hundred() {
    let mut order = pending_financing_order("worst", 20);
    order.created_at = Some(days_ago(90));
    order.last_contact_days_ago = 30;
    order.expected_delivery_date = Some(days_ago(10));
    order
        .activities
        .push(activity("angry", 1, Some(Sentiment::Negative)));

    let score = calculate_risk_score(&order, &config(), now());

    assert_eq!(score.value, 100);
    assert_eq!(score.level, RiskLevel::High);
    assert_eq!(score.factors.len(), 5);
    assert_eq!(score.fulfillment_probability(), 20);
}

#[test]
fn medium_order_lands_in_medium_tier() {
    let score = calculate_risk_score(&medium_risk_order("medium"), &config(), now());

    assert_eq!(score.value, 31);
    assert_eq!(score.level, RiskLevel::Medium);
    assert_eq!(
        score.top_factor().map(|factor| factor.factor),
        Some(RiskFactorKind::Sentiment)
    );
}

#[test]
fn explicit_config_changes_silence_threshold() {
    let mut order = base_order("custom");
    order.last_contact_days_ago = 5;
    let strict = RiskScoringConfig {
        silence_threshold_days: 3,
        ..RiskScoringConfig::default()
    };

    assert_eq!(calculate_risk_score(&order, &config(), now()).value, 0);
    assert_eq!(calculate_risk_score(&order, &strict, now()).value, 6);
}

#[test]
fn score_stays_bounded_and_level_consistent() {
    for last_contact in [0, 5, 8, 12, 40] {
        for pending in [0, 3, 6, 15] {
            for late in [0, 2, 7] {
                let mut order = pending_financing_order("grid", pending);
                order.last_contact_days_ago = last_contact;
                if late > 0 {
                    order.expected_delivery_date = Some(days_ago(late));
                }

                let score = calculate_risk_score(&order, &config(), now());

                assert!(score.value <= 100);
                assert_eq!(score.level, RiskLevel::from_score(score.value));
                let sum: u32 = score.factors.iter().map(|f| u32::from(f.impact)).sum();
                assert_eq!(u32::from(score.value), sum.min(100));
                assert!(score.factors.iter().all(|f| f.impact > 0));
            }
        }
    }
}

#[test]
fn scoring_is_repeatable_for_a_fixed_instant() {
    let order = high_risk_order("repeat");

    assert_eq!(
        calculate_risk_score(&order, &config(), now()),
        calculate_risk_score(&order, &config(), now())
    );
}

#[test]
fn unknown_update_time_zeroes_financing_and_stagnation() {
    let mut order = pending_financing_order("no-update", 10);
    order.created_at = Some(days_ago(90));
    order.updated_at = None;
    order.last_contact_days_ago = 10;

    let financing = calculate_financing_score(&order, 2, now());
    assert_eq!(financing.impact, 0);
    assert!(financing.description.contains("unknown"));
    assert_eq!(calculate_stagnation_score(&order, now()).impact, 0);

    let score = calculate_risk_score(&order, &config(), now());
    assert_eq!(score.value, 9);
    assert_eq!(
        score.top_factor().map(|factor| factor.factor),
        Some(RiskFactorKind::Silence)
    );
}

#[test]
fn unknown_creation_time_zeroes_stagnation() {
    let mut order = base_order("no-created");
    order.created_at = None;
    order.updated_at = Some(days_ago(40));

    let factor = calculate_stagnation_score(&order, now());

    assert_eq!(factor.impact, 0);
    assert!(factor.description.contains("unknown"));
}

#[test]
fn untimestamped_activities_are_ignored_for_sentiment() {
    let mut order = base_order("undated");
    let mut undated_praise = activity("praise", 0, Some(Sentiment::Positive));
    undated_praise.performed_at = None;
    order.activities = vec![
        activity("complaint", 24, Some(Sentiment::Negative)),
        undated_praise,
    ];
    assert_eq!(calculate_sentiment_score(&order).impact, 15);

    order.activities.remove(0);
    order.activities[0].sentiment = Some(Sentiment::Negative);
    assert_eq!(calculate_sentiment_score(&order).impact, 0);
}
