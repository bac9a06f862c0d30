use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::database::models::{Category, MenuItem, CATEGORIES};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::MenuService;
use crate::validation::{validate_payload, FieldRule, Rule};

const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required),
    FieldRule::new("price", Rule::Required),
    FieldRule::new(
        "price",
        Rule::Range {
            min: Some(0.01),
            max: None,
        },
    ),
    FieldRule::new("category", Rule::Required),
    FieldRule::new("category", Rule::OneOf(CATEGORIES)),
];

#[derive(Debug, Deserialize)]
struct CreateMenuItem {
    name: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    category: Category,
    image: Option<String>,
}

/// POST /menu - staff/admin
pub async fn create(Json(payload): Json<Value>) -> ApiResult<MenuItem> {
    validate_payload(CREATE_RULES, &payload)?;
    let req: CreateMenuItem =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let menu = MenuService::new().await?;
    let item = menu
        .create(
            &req.name,
            &req.description,
            req.price,
            req.category,
            req.image.as_deref(),
        )
        .await?;

    Ok(ApiResponse::created(item))
}
