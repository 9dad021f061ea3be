use super::super::domain::{FinancingStatus, Order, Sentiment};
use super::{RiskFactor, RiskFactorKind};
use chrono::{DateTime, Utc};

pub const SILENCE_POINTS_PER_DAY: i64 = 3;
pub const SILENCE_CAP: u8 = 25;
pub const FINANCING_POINTS_PER_DAY: i64 = 6;
pub const FINANCING_CAP: u8 = 30;
pub const DELAY_POINTS_PER_DAY: i64 = 4;
pub const DELAY_CAP: u8 = 20;
pub const NEGATIVE_SENTIMENT_IMPACT: u8 = 15;
pub const STAGNATION_MIN_AGE_DAYS: i64 = 14;
pub const STAGNATION_MIN_IDLE_DAYS: i64 = 5;
pub const STAGNATION_CAP: u8 = 10;

fn capped(points: i64, cap: u8) -> u8 {
    points.clamp(0, i64::from(cap)) as u8
}

/// Customer going cold: every day past the threshold adds three points.
pub fn calculate_silence_score(days_since_contact: u32, threshold: u32) -> RiskFactor {
    if days_since_contact <= threshold {
        return RiskFactor::inactive(
            RiskFactorKind::Silence,
            format!("last contact {days_since_contact} day(s) ago, within {threshold}-day window"),
        );
    }

    let overdue = i64::from(days_since_contact - threshold);
    RiskFactor {
        factor: RiskFactorKind::Silence,
        impact: capped(overdue * SILENCE_POINTS_PER_DAY, SILENCE_CAP),
        description: format!(
            "no contact for {days_since_contact} days ({overdue} past the {threshold}-day threshold)"
        ),
    }
}

pub fn calculate_financing_score(order: &Order, threshold: u32, now: DateTime<Utc>) -> RiskFactor {
    if order.financing_status != FinancingStatus::Pending {
        return RiskFactor::inactive(
            RiskFactorKind::Financing,
            format!("financing {}", order.financing_status.label().to_lowercase()),
        );
    }

    let threshold = i64::from(threshold);
    match order.financing_pending_days(now) {
        Some(days_pending) if days_pending > threshold => RiskFactor {
            factor: RiskFactorKind::Financing,
            impact: capped(
                (days_pending - threshold) * FINANCING_POINTS_PER_DAY,
                FINANCING_CAP,
            ),
            description: format!("financing pending for {days_pending} days"),
        },
        Some(days_pending) => RiskFactor::inactive(
            RiskFactorKind::Financing,
            format!("financing pending for {days_pending} day(s), within {threshold}-day window"),
        ),
        None => RiskFactor::inactive(
            RiskFactorKind::Financing,
            "financing pending, last update time unknown",
        ),
    }
}

pub fn calculate_delivery_delay_score(order: &Order, now: DateTime<Utc>) -> RiskFactor {
    let Some(expected) = order.expected_delivery_date else {
        return RiskFactor::inactive(RiskFactorKind::Delay, "no delivery date promised");
    };

    if !order.delivery_overdue(now) {
        return RiskFactor::inactive(
            RiskFactorKind::Delay,
            format!("delivery scheduled for {}", expected.date_naive()),
        );
    }

    let days_late = order.days_late(now);
    RiskFactor {
        factor: RiskFactorKind::Delay,
        impact: capped(days_late * DELAY_POINTS_PER_DAY, DELAY_CAP),
        description: format!(
            "delivery {days_late} day(s) past promised date {}",
            expected.date_naive()
        ),
    }
}

/// Only the latest sentiment-bearing activity counts; older readings are superseded.
pub fn calculate_sentiment_score(order: &Order) -> RiskFactor {
    match order.latest_sentiment() {
        Some(Sentiment::Negative) => RiskFactor {
            factor: RiskFactorKind::Sentiment,
            impact: NEGATIVE_SENTIMENT_IMPACT,
            description: "latest interaction recorded negative sentiment".to_string(),
        },
        Some(sentiment) => RiskFactor::inactive(
            RiskFactorKind::Sentiment,
            format!(
                "latest interaction sentiment {}",
                sentiment.label().to_lowercase()
            ),
        ),
        None => RiskFactor::inactive(RiskFactorKind::Sentiment, "no sentiment recorded"),
    }
}

pub fn calculate_stagnation_score(order: &Order, now: DateTime<Utc>) -> RiskFactor {
    let (Some(age), Some(idle)) = (order.age_days(now), order.days_since_update(now)) else {
        return RiskFactor::inactive(
            RiskFactorKind::Stagnation,
            "order creation or update time unknown",
        );
    };

    if age < STAGNATION_MIN_AGE_DAYS || idle < STAGNATION_MIN_IDLE_DAYS {
        return RiskFactor::inactive(
            RiskFactorKind::Stagnation,
            format!("order {age} day(s) old, updated {idle} day(s) ago"),
        );
    }

    RiskFactor {
        factor: RiskFactorKind::Stagnation,
        impact: capped(idle.div_euclid(2), STAGNATION_CAP),
        description: format!("no progress for {idle} days on a {age}-day-old order"),
    }
}
