use axum::Extension;

use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;

/// GET /auth/me - caller's own profile (password hash never serialized)
pub async fn me(Extension(auth_user): Extension<AuthUser>) -> ApiResult<User> {
    let users = UserService::new().await?;
    let user = users
        .find_by_id(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Account no longer exists"))?;

    Ok(ApiResponse::success(user))
}
