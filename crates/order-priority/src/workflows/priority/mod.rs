//! Daily risk scoring and next-best-action prioritization for in-flight vehicle orders.
//!
//! Everything in this module is a pure function of the order snapshot, the scoring
//! configuration, and the evaluation instant; callers supply all three explicitly.

pub mod actions;
pub mod domain;
pub mod list;
pub mod risk;
pub mod router;

#[cfg(test)]
mod tests;

pub use actions::{
    determine_next_best_action, get_all_applicable_actions, ApplicableAction, NextBestAction,
    Urgency, NO_ACTION_REQUIRED,
};
pub use domain::{
    Activity, ActivityKind, ContactChannel, Customer, FinancingStatus, Order, OrderId,
    OrderStatus, Sentiment, Vehicle,
};
pub use list::{
    calculate_aggregate_stats, generate_priority_item, generate_priority_items,
    generate_priority_list, generate_summary, AggregateStats, PriorityItem, PriorityList,
    PrioritySummary, ScoredOrder,
};
pub use risk::{
    calculate_risk_score, RiskFactor, RiskFactorKind, RiskLevel, RiskScore, RiskScoringConfig,
};
pub use router::priority_router;
