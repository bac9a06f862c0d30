use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;

/// GET /staff - admin only
pub async fn list() -> ApiResult<Vec<User>> {
    let users = UserService::new().await?;
    let staff = users.list_staff().await?;
    Ok(ApiResponse::success(staff))
}
