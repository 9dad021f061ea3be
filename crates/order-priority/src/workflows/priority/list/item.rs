use super::super::actions::{determine_next_best_action, NextBestAction};
use super::super::domain::{Order, OrderId};
use super::super::risk::{
    calculate_risk_score, fulfillment_probability, RiskFactor, RiskLevel, RiskScore,
    RiskScoringConfig,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

/// Read-only view of an order carrying the derived scoring fields.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredOrder<'a> {
    #[serde(flatten)]
    pub order: &'a Order,
    pub risk_score: u8,
    pub fulfillment_probability: u8,
}

impl<'a> ScoredOrder<'a> {
    pub fn new(order: &'a Order, risk_score: u8) -> Self {
        Self {
            order,
            risk_score,
            fulfillment_probability: fulfillment_probability(risk_score),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityItem<'a> {
    pub id: String,
    pub order_id: OrderId,
    pub order: ScoredOrder<'a>,
    pub rank: usize,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub next_best_action: NextBestAction,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PriorityItem<'_> {
    pub fn fulfillment_probability(&self) -> u8 {
        self.order.fulfillment_probability
    }

    pub fn total_amount(&self) -> f64 {
        self.order.order.total_amount
    }
}

/// Scores a single order and wraps it with its next best action at the given rank.
pub fn generate_priority_item<'a>(
    order: &'a Order,
    rank: usize,
    config: &RiskScoringConfig,
    now: DateTime<Utc>,
) -> PriorityItem<'a> {
    let score = calculate_risk_score(order, config, now);
    build_priority_item(order, score, rank, config, now)
}

pub(crate) fn build_priority_item<'a>(
    order: &'a Order,
    score: RiskScore,
    rank: usize,
    config: &RiskScoringConfig,
    now: DateTime<Utc>,
) -> PriorityItem<'a> {
    let next_best_action = determine_next_best_action(order, config, now)
        .unwrap_or_else(|| NextBestAction::no_action(order));

    PriorityItem {
        id: format!("{}-{}", local_date(now), order.id),
        order_id: order.id.clone(),
        order: ScoredOrder::new(order, score.value),
        rank,
        risk_score: score.value,
        risk_level: score.level,
        risk_factors: score.factors,
        next_best_action,
        generated_at: now,
        expires_at: end_of_local_day(now),
    }
}

pub fn local_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Local).date_naive()
}

/// 23:59:59.999 local time on the day containing `now`.
pub fn end_of_local_day(now: DateTime<Utc>) -> DateTime<Utc> {
    local_date(now)
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| naive.and_local_timezone(Local).latest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn end_of_local_day_is_last_millisecond() {
        let now = Utc
            .with_ymd_and_hms(2025, 6, 2, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let expires = end_of_local_day(now).with_timezone(&Local);

        assert!(expires.with_timezone(&Utc) >= now);
        assert_eq!(expires.date_naive(), local_date(now));
        assert_eq!(expires.hour(), 23);
        assert_eq!(expires.minute(), 59);
        assert_eq!(expires.second(), 59);
        assert_eq!(expires.nanosecond(), 999_000_000);
    }
}
