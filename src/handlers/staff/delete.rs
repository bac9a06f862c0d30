use axum::extract::Path;
use uuid::Uuid;

use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;

/// DELETE /staff/:id - admin only. Accounts are never removed; the row is
/// demoted back to a client with its salary cleared, keeping order history
/// attached to a real user.
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<User> {
    let users = UserService::new().await?;
    let user = users
        .demote_staff(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Staff member not found"))?;
    Ok(ApiResponse::success(user))
}
