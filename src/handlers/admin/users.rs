use axum::extract::Path;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{Role, User};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::validation::{validate_payload, FieldRule, Rule};

/// GET /admin/users - every account
pub async fn users() -> ApiResult<Vec<User>> {
    let users = UserService::new().await?;
    let result = users.list_all().await?;
    Ok(ApiResponse::success(result))
}

const ROLE_RULES: &[FieldRule] = &[
    FieldRule::new("role", Rule::Required),
    FieldRule::new("role", Rule::OneOf(&["client", "staff", "admin"])),
    // Promotions into salaried roles must state the salary
    FieldRule::new(
        "salary",
        Rule::RequiredIf {
            field: "role",
            equals: "staff",
        },
    ),
    FieldRule::new(
        "salary",
        Rule::RequiredIf {
            field: "role",
            equals: "admin",
        },
    ),
    FieldRule::new(
        "salary",
        Rule::Range {
            min: Some(0.0),
            max: None,
        },
    ),
];

#[derive(Debug, Deserialize)]
struct RoleRequest {
    role: Role,
    salary: Option<Decimal>,
}

/// PUT /admin/users/:id/role - single atomic role change; demotion to
/// client clears the salary
pub async fn update_role(Path(id): Path<Uuid>, Json(payload): Json<Value>) -> ApiResult<User> {
    validate_payload(ROLE_RULES, &payload)?;
    let req: RoleRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let users = UserService::new().await?;
    let user = users
        .update_role(id, req.role, req.salary)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(user))
}
