use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::database::models::Role;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::validation::{validate_payload, FieldRule, Rule};

const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required),
    FieldRule::new("email", Rule::Required),
    FieldRule::new("email", Rule::Email),
    FieldRule::new("password", Rule::Required),
    FieldRule::new("password", Rule::MinLength(6)),
    FieldRule::new("role", Rule::OneOf(&["staff", "admin"])),
    // Salaried roles must come with a salary
    FieldRule::new("salary", Rule::Required),
    FieldRule::new(
        "salary",
        Rule::Range {
            min: Some(0.0),
            max: None,
        },
    ),
];

#[derive(Debug, Deserialize)]
struct CreateStaff {
    name: String,
    email: String,
    password: String,
    role: Option<Role>,
    salary: Decimal,
}

/// POST /staff - admin only; creates a staff (or admin) account
pub async fn create(Json(payload): Json<Value>) -> ApiResult<Value> {
    validate_payload(CREATE_RULES, &payload)?;
    let req: CreateStaff =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let role = req.role.unwrap_or(Role::Staff);
    let password_hash = auth::hash_password(&req.password)?;

    let users = UserService::new().await?;
    let user = users
        .create(&req.name, &req.email, &password_hash, role, Some(req.salary))
        .await?;

    Ok(ApiResponse::created(json!({ "user": user })))
}
