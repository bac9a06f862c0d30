use axum::extract::Path;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::validation::{validate_payload, FieldRule, Rule};

const UPDATE_RULES: &[FieldRule] = &[FieldRule::new(
    "salary",
    Rule::Range {
        min: Some(0.0),
        max: None,
    },
)];

#[derive(Debug, Deserialize)]
struct UpdateStaff {
    name: Option<String>,
    salary: Option<Decimal>,
}

/// PUT /staff/:id - admin only
pub async fn update(Path(id): Path<Uuid>, Json(payload): Json<Value>) -> ApiResult<User> {
    validate_payload(UPDATE_RULES, &payload)?;
    let req: UpdateStaff =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let users = UserService::new().await?;
    let user = users
        .update_staff(id, req.name.as_deref(), req.salary)
        .await?
        .ok_or_else(|| ApiError::not_found("Staff member not found"))?;

    Ok(ApiResponse::success(user))
}
