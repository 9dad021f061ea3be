use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::priority::domain::{
    Activity, ActivityKind, ContactChannel, Customer, FinancingStatus, Order, OrderId,
    OrderStatus, Sentiment, Vehicle,
};
use crate::workflows::priority::risk::RiskScoringConfig;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
        .single()
        .expect("valid evaluation instant")
}

pub(super) fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub(super) fn config() -> RiskScoringConfig {
    RiskScoringConfig::default()
}

/// A quiet, healthy order: negotiating, paid cash, recently touched. Scores zero.
pub(super) fn base_order(id: &str) -> Order {
    Order {
        id: OrderId(id.to_string()),
        status: OrderStatus::Negotiating,
        financing_status: FinancingStatus::Cash,
        total_amount: 50_000.0,
        created_at: Some(days_ago(3)),
        updated_at: Some(days_ago(1)),
        expected_delivery_date: None,
        last_contact_days_ago: 1,
        customer: Customer {
            id: format!("cust-{id}"),
            name: "Lucia Mendez".to_string(),
            phone: Some("+52 55 1234 5678".to_string()),
            email: None,
            preferred_channel: ContactChannel::Whatsapp,
        },
        vehicle: Vehicle {
            id: format!("veh-{id}"),
            make: "Mazda".to_string(),
            model: "CX-5".to_string(),
            year: 2025,
            vin: None,
        },
        activities: Vec::new(),
    }
}

pub(super) fn activity(id: &str, hours_ago: i64, sentiment: Option<Sentiment>) -> Activity {
    Activity {
        id: id.to_string(),
        kind: ActivityKind::Call,
        summary: format!("activity {id}"),
        performed_at: Some(now() - Duration::hours(hours_ago)),
        sentiment,
    }
}

pub(super) fn pending_financing_order(id: &str, days_pending: i64) -> Order {
    let mut order = base_order(id);
    order.status = OrderStatus::FinancingPending;
    order.financing_status = FinancingStatus::Pending;
    order.created_at = Some(days_ago(days_pending + 1));
    order.updated_at = Some(days_ago(days_pending));
    order
}

pub(super) fn late_order(id: &str, days_late: i64, sentiment: Option<Sentiment>) -> Order {
    let mut order = base_order(id);
    order.expected_delivery_date = Some(days_ago(days_late));
    if sentiment.is_some() {
        order.activities.push(activity("latest", 2, sentiment));
    }
    order
}

/// silence 24 + financing 12 + delay 12 + sentiment 15 = 63, HIGH.
pub(super) fn high_risk_order(id: &str) -> Order {
    let mut order = pending_financing_order(id, 4);
    order.created_at = Some(days_ago(30));
    order.last_contact_days_ago = 15;
    order.expected_delivery_date = Some(days_ago(3));
    order
        .activities
        .push(activity("complaint", 5, Some(Sentiment::Negative)));
    order
}

/// silence 12 + sentiment 15 + stagnation 4 = 31, MEDIUM.
pub(super) fn medium_risk_order(id: &str) -> Order {
    let mut order = base_order(id);
    order.created_at = Some(days_ago(20));
    order.updated_at = Some(days_ago(9));
    order.last_contact_days_ago = 11;
    order
        .activities
        .push(activity("unhappy", 30, Some(Sentiment::Negative)));
    order
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
