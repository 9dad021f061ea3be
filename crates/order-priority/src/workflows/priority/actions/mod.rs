pub mod rules;

pub use rules::{action_rules, sorted_rules, ActionRule, RuleContext};

use super::domain::{ContactChannel, Order, OrderStatus};
use super::risk::RiskScoringConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Action text of the placeholder attached when nothing needs doing.
pub const NO_ACTION_REQUIRED: &str = "No action required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Now,
    Today,
    ThisWeek,
}

impl Urgency {
    pub const fn ordered() -> [Self; 3] {
        [Self::Now, Self::Today, Self::ThisWeek]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Now => "Now",
            Self::Today => "Today",
            Self::ThisWeek => "This Week",
        }
    }
}

/// The single step a salesperson should take next on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextBestAction {
    pub action: String,
    pub channel: ContactChannel,
    pub urgency: Urgency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_message: Option<String>,
    pub expected_impact: String,
    pub reasoning: String,
}

impl NextBestAction {
    pub fn no_action(order: &Order) -> Self {
        Self {
            action: NO_ACTION_REQUIRED.to_string(),
            channel: order.customer.preferred_channel,
            urgency: Urgency::ThisWeek,
            suggested_message: None,
            expected_impact: "Order is progressing without intervention".to_string(),
            reasoning: format!("No rule matched for status {}", order.status.label()),
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.action != NO_ACTION_REQUIRED
    }
}

/// A matching rule together with the action it would dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicableAction {
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub priority: u8,
    pub action: NextBestAction,
}

/// Picks the first matching rule in priority order, falling back on the order status.
pub fn determine_next_best_action(
    order: &Order,
    config: &RiskScoringConfig,
    now: DateTime<Utc>,
) -> Option<NextBestAction> {
    let context = RuleContext { config, now };

    if let Some(rule) = sorted_rules()
        .into_iter()
        .find(|rule| rule.matches(order, &context))
    {
        debug!(order_id = %order.id, rule = rule.id, "next best action rule matched");
        return Some(rule.build(order, &context));
    }

    fallback_action(order)
}

/// Every rule whose condition holds, in evaluation order. Diagnostic only.
pub fn get_all_applicable_actions(
    order: &Order,
    config: &RiskScoringConfig,
    now: DateTime<Utc>,
) -> Vec<ApplicableAction> {
    let context = RuleContext { config, now };

    sorted_rules()
        .into_iter()
        .filter(|rule| rule.matches(order, &context))
        .map(|rule| ApplicableAction {
            rule_id: rule.id,
            rule_name: rule.name,
            priority: rule.priority,
            action: rule.build(order, &context),
        })
        .collect()
}

fn fallback_action(order: &Order) -> Option<NextBestAction> {
    let urgency = match order.status {
        OrderStatus::New => Urgency::Today,
        OrderStatus::Contacted => Urgency::ThisWeek,
        _ => return None,
    };

    Some(NextBestAction {
        action: "Follow up with customer".to_string(),
        channel: order.customer.preferred_channel,
        urgency,
        suggested_message: Some(format!(
            "Hi {}, following up on your interest in the {}. Happy to answer any questions.",
            order.customer.first_name(),
            order.vehicle.display_name()
        )),
        expected_impact: "Moves an early-stage order forward".to_string(),
        reasoning: format!(
            "Order is {} with no urgent signals",
            order.status.label().to_lowercase()
        ),
    })
}
