use super::super::domain::{ContactChannel, Order, OrderStatus, Sentiment};
use super::super::risk::RiskScoringConfig;
use super::{NextBestAction, Urgency};
use chrono::{DateTime, Utc};

/// Minimum silence before a high-value order earns a personal call.
pub const HIGH_VALUE_CONTACT_GAP_DAYS: u32 = 3;

/// Inputs shared by every rule evaluation.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub config: &'a RiskScoringConfig,
    pub now: DateTime<Utc>,
}

/// One entry of the next-best-action decision list.
#[derive(Clone, Copy)]
pub struct ActionRule {
    pub id: &'static str,
    pub name: &'static str,
    /// Lower values are evaluated first.
    pub priority: u8,
    pub condition: fn(&Order, &RuleContext<'_>) -> bool,
    pub action: fn(&Order, &RuleContext<'_>) -> NextBestAction,
}

impl ActionRule {
    pub fn matches(&self, order: &Order, context: &RuleContext<'_>) -> bool {
        (self.condition)(order, context)
    }

    pub fn build(&self, order: &Order, context: &RuleContext<'_>) -> NextBestAction {
        (self.action)(order, context)
    }
}

impl std::fmt::Debug for ActionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

static ACTION_RULES: [ActionRule; 6] = [
    ActionRule {
        id: "financing-followup",
        name: "Financing follow-up",
        priority: 1,
        condition: financing_stalled,
        action: financing_followup,
    },
    ActionRule {
        id: "delivery-delay-escalation",
        name: "Delivery delay escalation",
        priority: 0,
        condition: delay_with_negative_sentiment,
        action: delivery_delay_escalation,
    },
    ActionRule {
        id: "delivery-delay-notification",
        name: "Delivery delay notification",
        priority: 2,
        condition: delay_without_negative_sentiment,
        action: delivery_delay_notification,
    },
    ActionRule {
        id: "vehicle-arrived-schedule",
        name: "Schedule vehicle delivery",
        priority: 2,
        condition: vehicle_ready,
        action: vehicle_arrived_schedule,
    },
    ActionRule {
        id: "silence-checkin",
        name: "Silence check-in",
        priority: 3,
        condition: customer_silent,
        action: silence_checkin,
    },
    ActionRule {
        id: "high-value-personal",
        name: "High-value personal touch",
        priority: 4,
        condition: high_value_needs_contact,
        action: high_value_personal,
    },
];

/// The rule table in declaration order.
pub fn action_rules() -> &'static [ActionRule] {
    &ACTION_RULES
}

/// Rules in evaluation order. Equal priorities keep declaration order.
pub fn sorted_rules() -> Vec<&'static ActionRule> {
    let mut rules: Vec<&'static ActionRule> = ACTION_RULES.iter().collect();
    rules.sort_by_key(|rule| rule.priority);
    rules
}

fn financing_stalled(order: &Order, context: &RuleContext<'_>) -> bool {
    order
        .financing_pending_days(context.now)
        .map(|days| days > i64::from(context.config.financing_pending_threshold_days))
        .unwrap_or(false)
}

fn delay_with_negative_sentiment(order: &Order, context: &RuleContext<'_>) -> bool {
    order.delivery_overdue(context.now) && order.latest_sentiment() == Some(Sentiment::Negative)
}

fn delay_without_negative_sentiment(order: &Order, context: &RuleContext<'_>) -> bool {
    order.delivery_overdue(context.now) && order.latest_sentiment() != Some(Sentiment::Negative)
}

fn vehicle_ready(order: &Order, _context: &RuleContext<'_>) -> bool {
    order.status.vehicle_ready() && order.status != OrderStatus::Delivered
}

fn customer_silent(order: &Order, context: &RuleContext<'_>) -> bool {
    order.last_contact_days_ago > context.config.silence_threshold_days
}

fn high_value_needs_contact(order: &Order, context: &RuleContext<'_>) -> bool {
    order.total_amount >= context.config.high_value_threshold
        && order.last_contact_days_ago > HIGH_VALUE_CONTACT_GAP_DAYS
}

fn financing_followup(order: &Order, context: &RuleContext<'_>) -> NextBestAction {
    let days = order.financing_pending_days(context.now).unwrap_or(0);
    NextBestAction {
        action: "Call customer to unblock pending financing".to_string(),
        channel: ContactChannel::Call,
        urgency: Urgency::Today,
        suggested_message: Some(format!(
            "Hi {}, we're reviewing your financing application for the {}. Do you have a minute to go over the remaining documents?",
            order.customer.first_name(),
            order.vehicle.display_name()
        )),
        expected_impact: "Clears the financing bottleneck before the deal stalls".to_string(),
        reasoning: format!(
            "Financing has been pending for {days} days (threshold {})",
            context.config.financing_pending_threshold_days
        ),
    }
}

fn delivery_delay_escalation(order: &Order, context: &RuleContext<'_>) -> NextBestAction {
    NextBestAction {
        action: "Call customer to address delivery delay concerns".to_string(),
        channel: ContactChannel::Call,
        urgency: Urgency::Now,
        suggested_message: Some(format!(
            "Hi {}, I know the delay on your {} has been frustrating. I'd like to walk you through the new timeline personally.",
            order.customer.first_name(),
            order.vehicle.display_name()
        )),
        expected_impact: "Prevents cancellation from an upset customer".to_string(),
        reasoning: format!(
            "Delivery is {} day(s) late and the latest interaction was negative",
            order.days_late(context.now)
        ),
    }
}

fn delivery_delay_notification(order: &Order, context: &RuleContext<'_>) -> NextBestAction {
    NextBestAction {
        action: "Send delivery delay update".to_string(),
        channel: ContactChannel::Whatsapp,
        urgency: Urgency::Now,
        suggested_message: Some(format!(
            "Hi {}, a quick update on your {}: delivery is running behind schedule. We'll confirm the new date shortly.",
            order.customer.first_name(),
            order.vehicle.display_name()
        )),
        expected_impact: "Keeps the customer informed before frustration builds".to_string(),
        reasoning: format!(
            "Delivery is {} day(s) past the promised date",
            order.days_late(context.now)
        ),
    }
}

fn vehicle_arrived_schedule(order: &Order, _context: &RuleContext<'_>) -> NextBestAction {
    NextBestAction {
        action: "Schedule vehicle delivery appointment".to_string(),
        channel: ContactChannel::Call,
        urgency: Urgency::Today,
        suggested_message: Some(format!(
            "Great news {}! Your {} is ready. When would you like to pick it up?",
            order.customer.first_name(),
            order.vehicle.display_name()
        )),
        expected_impact: "Converts a ready vehicle into a completed delivery".to_string(),
        reasoning: format!("Order status is {}", order.status.label()),
    }
}

fn silence_checkin(order: &Order, context: &RuleContext<'_>) -> NextBestAction {
    NextBestAction {
        action: "Send check-in message".to_string(),
        channel: ContactChannel::Whatsapp,
        urgency: Urgency::Today,
        suggested_message: Some(format!(
            "Hi {}, just checking in on your {} order. Anything I can help with?",
            order.customer.first_name(),
            order.vehicle.display_name()
        )),
        expected_impact: "Re-engages a customer who is going quiet".to_string(),
        reasoning: format!(
            "No contact for {} days (threshold {})",
            order.last_contact_days_ago, context.config.silence_threshold_days
        ),
    }
}

fn high_value_personal(order: &Order, _context: &RuleContext<'_>) -> NextBestAction {
    NextBestAction {
        action: "Personal follow-up call for high-value order".to_string(),
        channel: ContactChannel::Call,
        urgency: Urgency::ThisWeek,
        suggested_message: None,
        expected_impact: "Protects a high-value relationship".to_string(),
        reasoning: format!(
            "Order value {:.2} with no contact for {} days",
            order.total_amount, order.last_contact_days_ago
        ),
    }
}
