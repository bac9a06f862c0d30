use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::validation::{validate_payload, FieldRule, Rule};

const LOGIN_RULES: &[FieldRule] = &[
    FieldRule::new("email", Rule::Required),
    FieldRule::new("password", Rule::Required),
];

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// POST /auth/login - authenticate and return a session token
///
/// Unknown email and wrong password return the same 401 so the endpoint
/// does not leak which accounts exist.
pub async fn login(Json(payload): Json<Value>) -> ApiResult<Value> {
    validate_payload(LOGIN_RULES, &payload)?;
    let req: LoginRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let users = UserService::new().await?;
    let user = users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !auth::verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = auth::issue_token(&config::config().security, user.id, user.role)?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": user,
    })))
}
