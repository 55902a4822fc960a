use super::success_response;
use crate::{errors::ServiceError, AppState};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

/// Creates the router for order planning and fulfillment endpoints
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/plan/:product_id", get(plan_order))
        .route("/fulfill", post(fulfill_order))
}

#[derive(Debug, Deserialize)]
pub struct FulfillOrderRequest {
    pub product_id: i64,
    /// Set after the caller has seen the computed delay and chosen to
    /// proceed anyway.
    #[serde(default)]
    pub accept_delay: bool,
}

async fn plan_order(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Response, ServiceError> {
    let plan = state.orders.plan_order(product_id).await?;
    Ok(success_response(plan))
}

async fn fulfill_order(
    State(state): State<AppState>,
    Json(payload): Json<FulfillOrderRequest>,
) -> Result<Response, ServiceError> {
    let outcome = state
        .orders
        .fulfill_order(payload.product_id, payload.accept_delay)
        .await?;
    Ok(success_response(outcome))
}
