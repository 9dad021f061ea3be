use super::common::*;
use crate::workflows::priority::actions::{
    determine_next_best_action, get_all_applicable_actions, Urgency,
};
use crate::workflows::priority::domain::{ContactChannel, OrderStatus, Sentiment};
use crate::workflows::priority::risk::RiskScoringConfig;

#[test]
fn financing_followup_outranks_silence() {
    let mut order = pending_financing_order("fin-silent", 5);
    order.last_contact_days_ago = 12;

    let action = determine_next_best_action(&order, &config(), now()).expect("action chosen");

    assert_eq!(action.channel, ContactChannel::Call);
    assert_eq!(action.urgency, Urgency::Today);
    assert!(action.action.to_lowercase().contains("financing"));
    assert!(action.reasoning.contains("5 days"));
}

#[test]
fn late_delivery_with_negative_sentiment_escalates() {
    let order = late_order("late-angry", 3, Some(Sentiment::Negative));

    let action = determine_next_best_action(&order, &config(), now()).expect("action chosen");

    assert!(action.action.contains("concerns"));
    assert_eq!(action.channel, ContactChannel::Call);
    assert_eq!(action.urgency, Urgency::Now);
}

#[test]
fn late_delivery_without_complaint_sends_update() {
    for sentiment in [None, Some(Sentiment::Positive), Some(Sentiment::Neutral)] {
        let order = late_order("late-calm", 2, sentiment);

        let action =
            determine_next_best_action(&order, &config(), now()).expect("action chosen");

        assert_eq!(action.action, "Send delivery delay update");
        assert_eq!(action.channel, ContactChannel::Whatsapp);
        assert_eq!(action.urgency, Urgency::Now);
    }
}

#[test]
fn escalation_takes_precedence_over_financing_followup() {
    let mut order = pending_financing_order("everything", 6);
    order.expected_delivery_date = Some(days_ago(2));
    order
        .activities
        .push(activity("angry", 1, Some(Sentiment::Negative)));

    let action = determine_next_best_action(&order, &config(), now()).expect("action chosen");

    assert!(action.action.contains("concerns"));
}

#[test]
fn ready_vehicle_gets_delivery_scheduled() {
    for status in [OrderStatus::FinancingApproved, OrderStatus::ReadyForDelivery] {
        let mut order = base_order("ready");
        order.status = status;

        let action =
            determine_next_best_action(&order, &config(), now()).expect("action chosen");

        assert_eq!(action.action, "Schedule vehicle delivery appointment");
        assert_eq!(action.urgency, Urgency::Today);
    }
}

#[test]
fn silent_customer_gets_check_in() {
    let mut order = base_order("silent");
    order.last_contact_days_ago = 10;

    let action = determine_next_best_action(&order, &config(), now()).expect("action chosen");

    assert_eq!(action.action, "Send check-in message");
    assert_eq!(action.channel, ContactChannel::Whatsapp);
    assert!(action
        .suggested_message
        .as_deref()
        .is_some_and(|message| message.starts_with("Hi Lucia")));
}

#[test]
fn high_value_order_gets_personal_call() {
    let mut order = base_order("vip");
    order.total_amount = 250_000.0;
    order.last_contact_days_ago = 5;

    let action = determine_next_best_action(&order, &config(), now()).expect("action chosen");

    assert_eq!(action.channel, ContactChannel::Call);
    assert_eq!(action.urgency, Urgency::ThisWeek);

    order.last_contact_days_ago = 3;
    assert!(determine_next_best_action(&order, &config(), now()).is_none());
}

#[test]
fn high_value_threshold_comes_from_config() {
    let mut order = base_order("mid-value");
    order.total_amount = 120_000.0;
    order.last_contact_days_ago = 5;
    let lowered = RiskScoringConfig {
        high_value_threshold: 100_000.0,
        ..RiskScoringConfig::default()
    };

    assert!(determine_next_best_action(&order, &config(), now()).is_none());
    let action = determine_next_best_action(&order, &lowered, now()).expect("action chosen");
    assert_eq!(action.urgency, Urgency::ThisWeek);
}

#[test]
fn early_stage_orders_fall_back_to_follow_up() {
    let mut order = base_order("lead");
    order.status = OrderStatus::New;

    let action = determine_next_best_action(&order, &config(), now()).expect("fallback action");
    assert_eq!(action.action, "Follow up with customer");
    assert_eq!(action.channel, ContactChannel::Whatsapp);
    assert_eq!(action.urgency, Urgency::Today);

    order.status = OrderStatus::Contacted;
    order.customer.preferred_channel = ContactChannel::Email;
    let action = determine_next_best_action(&order, &config(), now()).expect("fallback action");
    assert_eq!(action.channel, ContactChannel::Email);
    assert_eq!(action.urgency, Urgency::ThisWeek);
}

#[test]
fn later_stage_orders_without_signals_need_nothing() {
    let order = base_order("steady");

    assert!(determine_next_best_action(&order, &config(), now()).is_none());
    assert!(get_all_applicable_actions(&order, &config(), now()).is_empty());
}

#[test]
fn applicable_actions_list_every_match_in_priority_order() {
    let mut order = pending_financing_order("many", 4);
    order.total_amount = 320_000.0;
    order.last_contact_days_ago = 9;

    let applicable = get_all_applicable_actions(&order, &config(), now());
    let ids: Vec<&str> = applicable.iter().map(|entry| entry.rule_id).collect();

    assert_eq!(
        ids,
        vec!["financing-followup", "silence-checkin", "high-value-personal"]
    );
    let chosen = determine_next_best_action(&order, &config(), now()).expect("action chosen");
    assert_eq!(applicable[0].action, chosen);
}
