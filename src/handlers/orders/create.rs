use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::Order;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::OrderService;
use crate::validation::{validate_payload, FieldRule, Rule};

const LINE_RULES: &[FieldRule] = &[
    FieldRule::new("menuItemId", Rule::Required),
    FieldRule::new("menuItemId", Rule::Uuid),
    FieldRule::new("quantity", Rule::Required),
    FieldRule::new(
        "quantity",
        Rule::Range {
            min: Some(1.0),
            max: None,
        },
    ),
];

const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("items", Rule::Required),
    FieldRule::new("items", Rule::Each(LINE_RULES)),
];

#[derive(Debug, Deserialize)]
struct CreateOrder {
    items: Vec<LineRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineRequest {
    menu_item_id: Uuid,
    quantity: u32,
}

/// POST /orders - any authenticated role, order belongs to the caller.
/// Total is computed from current menu prices and snapshotted per line.
pub async fn create(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Order> {
    validate_payload(CREATE_RULES, &payload)?;
    let req: CreateOrder =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    if req.items.is_empty() {
        return Err(ApiError::bad_request("Order must contain at least one item"));
    }

    let requested: Vec<(Uuid, u32)> = req
        .items
        .iter()
        .map(|line| (line.menu_item_id, line.quantity))
        .collect();

    let orders = OrderService::new().await?;
    let order = orders.create(auth_user.id, &requested).await?;

    Ok(ApiResponse::created(order))
}
