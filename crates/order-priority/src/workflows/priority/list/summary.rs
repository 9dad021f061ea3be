use super::super::actions::Urgency;
use super::super::domain::{ContactChannel, Order};
use super::super::risk::{calculate_risk_score, RiskFactorKind, RiskLevel, RiskScoringConfig};
use super::item::{build_priority_item, local_date, PriorityItem};
use super::views::{
    AggregateStats, ChannelLoadEntry, FactorFrequencyEntry, PriorityList, PrioritySummary,
    UrgencyLoadEntry,
};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Scores every non-terminal order and ranks them by descending risk.
///
/// Equal scores keep their input order; ranks are dense and start at 1.
pub fn generate_priority_items<'a>(
    orders: &'a [Order],
    config: &RiskScoringConfig,
    now: DateTime<Utc>,
) -> Vec<PriorityItem<'a>> {
    let mut scored: Vec<_> = orders
        .iter()
        .filter(|order| !order.status.is_terminal())
        .map(|order| (order, calculate_risk_score(order, config, now)))
        .collect();

    scored.sort_by(|(_, a), (_, b)| b.value.cmp(&a.value));

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (order, score))| build_priority_item(order, score, index + 1, config, now))
        .collect()
}

pub fn generate_summary(items: &[PriorityItem<'_>]) -> PrioritySummary {
    let count_level = |level: RiskLevel| {
        items
            .iter()
            .filter(|item| item.risk_level == level)
            .count()
    };

    let actionable: Vec<&PriorityItem<'_>> = items
        .iter()
        .filter(|item| item.next_best_action.is_actionable())
        .collect();

    let urgency_load = Urgency::ordered()
        .into_iter()
        .filter_map(|urgency| {
            let actions = actionable
                .iter()
                .filter(|item| item.next_best_action.urgency == urgency)
                .count();
            (actions > 0).then_some(UrgencyLoadEntry {
                urgency,
                urgency_label: urgency.label(),
                actions,
            })
        })
        .collect();

    let channel_load = ContactChannel::ordered()
        .into_iter()
        .filter_map(|channel| {
            let actions = actionable
                .iter()
                .filter(|item| item.next_best_action.channel == channel)
                .count();
            (actions > 0).then_some(ChannelLoadEntry {
                channel,
                channel_label: channel.label(),
                actions,
            })
        })
        .collect();

    let factor_frequency = RiskFactorKind::ordered()
        .into_iter()
        .filter_map(|factor| {
            let orders = items
                .iter()
                .filter(|item| item.risk_factors.iter().any(|f| f.factor == factor))
                .count();
            (orders > 0).then_some(FactorFrequencyEntry {
                factor,
                factor_label: factor.label(),
                orders,
            })
        })
        .collect();

    PrioritySummary {
        total_orders: items.len(),
        high_risk: count_level(RiskLevel::High),
        medium_risk: count_level(RiskLevel::Medium),
        low_risk: count_level(RiskLevel::Low),
        total_actions: actionable.len(),
        stats: calculate_aggregate_stats(items),
        urgency_load,
        channel_load,
        factor_frequency,
    }
}

/// An empty list counts as perfectly healthy: 100% fulfillment, zero risk and value.
pub fn calculate_aggregate_stats(items: &[PriorityItem<'_>]) -> AggregateStats {
    if items.is_empty() {
        return AggregateStats::default();
    }

    let count = items.len() as f64;
    let total_risk: f64 = items.iter().map(|item| f64::from(item.risk_score)).sum();
    let total_fulfillment: f64 = items
        .iter()
        .map(|item| f64::from(item.fulfillment_probability()))
        .sum();
    let total_order_value: f64 = items.iter().map(PriorityItem::total_amount).sum();
    let at_risk_order_value: f64 = items
        .iter()
        .filter(|item| item.risk_level.is_at_risk())
        .map(PriorityItem::total_amount)
        .sum();

    AggregateStats {
        average_risk_score: total_risk / count,
        average_fulfillment_probability: total_fulfillment / count,
        total_order_value,
        at_risk_order_value,
    }
}

pub fn generate_priority_list<'a>(
    orders: &'a [Order],
    config: &RiskScoringConfig,
    now: DateTime<Utc>,
) -> PriorityList<'a> {
    let items = generate_priority_items(orders, config, now);
    let summary = generate_summary(&items);

    debug!(
        received = orders.len(),
        prioritized = items.len(),
        high_risk = summary.high_risk,
        actions = summary.total_actions,
        "priority list generated"
    );

    PriorityList {
        date: local_date(now),
        generated_at: now,
        summary,
        items,
    }
}
