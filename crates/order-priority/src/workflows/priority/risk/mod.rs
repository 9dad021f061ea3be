mod config;
pub mod factors;

pub use config::{
    RiskScoringConfig, DEFAULT_FINANCING_PENDING_THRESHOLD_DAYS, DEFAULT_HIGH_VALUE_THRESHOLD,
    DEFAULT_SILENCE_THRESHOLD_DAYS,
};
pub use factors::{
    calculate_delivery_delay_score, calculate_financing_score, calculate_sentiment_score,
    calculate_silence_score, calculate_stagnation_score,
};

use super::domain::Order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_RISK_SCORE: u8 = 100;
pub const HIGH_RISK_THRESHOLD: u8 = 60;
pub const MEDIUM_RISK_THRESHOLD: u8 = 30;
pub const MIN_FULFILLMENT_PROBABILITY: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskFactorKind {
    Silence,
    Financing,
    Delay,
    Sentiment,
    Stagnation,
}

impl RiskFactorKind {
    /// Evaluation order, which is also the tie-break order for equal impacts.
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Silence,
            Self::Financing,
            Self::Delay,
            Self::Sentiment,
            Self::Stagnation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Silence => "Customer Silence",
            Self::Financing => "Financing Stalled",
            Self::Delay => "Delivery Delay",
            Self::Sentiment => "Negative Sentiment",
            Self::Stagnation => "Deal Stagnation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn from_score(value: u8) -> Self {
        if value >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if value >= MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn is_at_risk(self) -> bool {
        matches!(self, Self::High | Self::Medium)
    }
}

/// One explainable contribution to an order's risk score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: RiskFactorKind,
    pub impact: u8,
    pub description: String,
}

impl RiskFactor {
    pub(crate) fn inactive(factor: RiskFactorKind, description: impl Into<String>) -> Self {
        Self {
            factor,
            impact: 0,
            description: description.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.impact > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub value: u8,
    pub level: RiskLevel,
    pub factors: Vec<RiskFactor>,
}

impl RiskScore {
    pub fn fulfillment_probability(&self) -> u8 {
        fulfillment_probability(self.value)
    }

    pub fn top_factor(&self) -> Option<&RiskFactor> {
        self.factors.first()
    }
}

/// Display-oriented inverse of the risk score, floored at 20.
pub fn fulfillment_probability(risk_score: u8) -> u8 {
    MAX_RISK_SCORE
        .saturating_sub(risk_score)
        .max(MIN_FULFILLMENT_PROBABILITY)
}

/// Scores an order against every risk signal.
///
/// Factors without impact are dropped; the remainder is ordered by impact with ties kept in
/// evaluation order (silence, financing, delay, sentiment, stagnation).
pub fn calculate_risk_score(
    order: &Order,
    config: &RiskScoringConfig,
    now: DateTime<Utc>,
) -> RiskScore {
    let evaluated = [
        calculate_silence_score(order.last_contact_days_ago, config.silence_threshold_days),
        calculate_financing_score(order, config.financing_pending_threshold_days, now),
        calculate_delivery_delay_score(order, now),
        calculate_sentiment_score(order),
        calculate_stagnation_score(order, now),
    ];

    let total: u32 = evaluated
        .iter()
        .map(|factor| u32::from(factor.impact))
        .sum();
    let value = total.min(u32::from(MAX_RISK_SCORE)) as u8;

    let mut factors: Vec<RiskFactor> = evaluated
        .into_iter()
        .filter(RiskFactor::is_active)
        .collect();
    factors.sort_by(|a, b| b.impact.cmp(&a.impact));

    RiskScore {
        value,
        level: RiskLevel::from_score(value),
        factors,
    }
}
