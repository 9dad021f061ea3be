use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::actions::{
    determine_next_best_action, get_all_applicable_actions, ApplicableAction, NextBestAction,
};
use super::domain::{Order, OrderId};
use super::list::generate_priority_list;
use super::risk::{calculate_risk_score, RiskScore, RiskScoringConfig};

#[derive(Debug, Deserialize)]
pub struct PriorityListRequest {
    pub orders: Vec<Order>,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub order: Order,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct RiskScoreResponse {
    pub order_id: OrderId,
    pub risk_score: RiskScore,
    pub fulfillment_probability: u8,
}

#[derive(Debug, Serialize)]
pub struct NextBestActionResponse {
    pub order_id: OrderId,
    pub next_best_action: Option<NextBestAction>,
    pub applicable: Vec<ApplicableAction>,
}

/// Router exposing the scoring pipeline over HTTP. Requests are independent and stateless.
pub fn priority_router(config: RiskScoringConfig) -> Router {
    Router::new()
        .route("/api/v1/priority/list", post(list_handler))
        .route("/api/v1/priority/risk-score", post(risk_score_handler))
        .route(
            "/api/v1/priority/next-best-action",
            post(next_best_action_handler),
        )
        .with_state(Arc::new(config))
}

pub(crate) async fn list_handler(
    State(config): State<Arc<RiskScoringConfig>>,
    Json(request): Json<PriorityListRequest>,
) -> Response {
    let now = request.now.unwrap_or_else(Utc::now);
    let list = generate_priority_list(&request.orders, &config, now);
    (StatusCode::OK, Json(&list)).into_response()
}

pub(crate) async fn risk_score_handler(
    State(config): State<Arc<RiskScoringConfig>>,
    Json(request): Json<OrderRequest>,
) -> Json<RiskScoreResponse> {
    let now = request.now.unwrap_or_else(Utc::now);
    let risk_score = calculate_risk_score(&request.order, &config, now);

    Json(RiskScoreResponse {
        order_id: request.order.id,
        fulfillment_probability: risk_score.fulfillment_probability(),
        risk_score,
    })
}

pub(crate) async fn next_best_action_handler(
    State(config): State<Arc<RiskScoringConfig>>,
    Json(request): Json<OrderRequest>,
) -> Json<NextBestActionResponse> {
    let now = request.now.unwrap_or_else(Utc::now);
    let next_best_action = determine_next_best_action(&request.order, &config, now);
    let applicable = get_all_applicable_actions(&request.order, &config, now);

    Json(NextBestActionResponse {
        order_id: request.order.id,
        next_best_action,
        applicable,
    })
}
