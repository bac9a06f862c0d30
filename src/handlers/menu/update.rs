use axum::extract::Path;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{Category, MenuItem, CATEGORIES};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::MenuService;
use crate::validation::{validate_payload, FieldRule, Rule};

// All fields optional on update; present ones must still be well formed
const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::new(
        "price",
        Rule::Range {
            min: Some(0.01),
            max: None,
        },
    ),
    FieldRule::new("category", Rule::OneOf(CATEGORIES)),
];

#[derive(Debug, Deserialize)]
struct UpdateMenuItem {
    name: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    category: Option<Category>,
    image: Option<String>,
    available: Option<bool>,
}

/// PUT /menu/:id - staff/admin
pub async fn update(Path(id): Path<Uuid>, Json(payload): Json<Value>) -> ApiResult<MenuItem> {
    validate_payload(UPDATE_RULES, &payload)?;
    // An explicit `"image": null` clears the image; an absent key keeps it
    let image_present = payload.get("image").is_some();
    let req: UpdateMenuItem =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let image = image_present.then(|| req.image.as_deref());

    let menu = MenuService::new().await?;
    let item = menu
        .update(
            id,
            req.name.as_deref(),
            req.description.as_deref(),
            req.price,
            req.category,
            image,
            req.available,
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item not found"))?;

    Ok(ApiResponse::success(item))
}
