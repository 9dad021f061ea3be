use super::super::actions::Urgency;
use super::super::domain::ContactChannel;
use super::super::risk::RiskFactorKind;
use super::item::PriorityItem;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateStats {
    pub average_risk_score: f64,
    pub average_fulfillment_probability: f64,
    pub total_order_value: f64,
    /// Value of HIGH and MEDIUM risk orders only.
    pub at_risk_order_value: f64,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            average_risk_score: 0.0,
            average_fulfillment_probability: 100.0,
            total_order_value: 0.0,
            at_risk_order_value: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrgencyLoadEntry {
    pub urgency: Urgency,
    pub urgency_label: &'static str,
    pub actions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelLoadEntry {
    pub channel: ContactChannel,
    pub channel_label: &'static str,
    pub actions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorFrequencyEntry {
    pub factor: RiskFactorKind,
    pub factor_label: &'static str,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritySummary {
    pub total_orders: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    /// Items carrying something other than the "No action required" placeholder.
    pub total_actions: usize,
    pub stats: AggregateStats,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urgency_load: Vec<UrgencyLoadEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_load: Vec<ChannelLoadEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factor_frequency: Vec<FactorFrequencyEntry>,
}

/// Output of one generation cycle.
#[derive(Debug, Clone, Serialize)]
pub struct PriorityList<'a> {
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub summary: PrioritySummary,
    pub items: Vec<PriorityItem<'a>>,
}
