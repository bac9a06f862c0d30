use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{Order, OrderStatus, ORDER_STATUSES};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::OrderService;
use crate::validation::{validate_payload, FieldRule, Rule};

const STATUS_RULES: &[FieldRule] = &[
    FieldRule::new("status", Rule::Required),
    FieldRule::new("status", Rule::OneOf(ORDER_STATUSES)),
];

#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: OrderStatus,
}

/// PUT /orders/:id/status - staff/admin. Overwrites the status field;
/// transitions are not otherwise constrained.
pub async fn update_status(Path(id): Path<Uuid>, Json(payload): Json<Value>) -> ApiResult<Order> {
    validate_payload(STATUS_RULES, &payload)?;
    let req: StatusRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let orders = OrderService::new().await?;
    let order = orders
        .update_status(id, req.status)
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;

    Ok(ApiResponse::success(order))
}
