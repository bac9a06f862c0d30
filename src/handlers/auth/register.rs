use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::config;
use crate::database::models::Role;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::validation::{validate_payload, FieldRule, Rule};

const REGISTER_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required),
    FieldRule::new("email", Rule::Required),
    FieldRule::new("email", Rule::Email),
    FieldRule::new("password", Rule::Required),
    FieldRule::new("password", Rule::MinLength(6)),
];

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

/// POST /auth/register - create a client account and return a session token
///
/// Registration always produces a `client` role account; staff and admin
/// accounts are created through the admin-only staff routes.
pub async fn register(Json(payload): Json<Value>) -> ApiResult<Value> {
    validate_payload(REGISTER_RULES, &payload)?;
    let req: RegisterRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let password_hash = auth::hash_password(&req.password)?;

    let users = UserService::new().await?;
    let user = users
        .create(&req.name, &req.email, &password_hash, Role::Client, None)
        .await?;

    let token = auth::issue_token(&config::config().security, user.id, user.role)?;

    Ok(ApiResponse::created(json!({
        "token": token,
        "user": user,
    })))
}
