use axum::extract::Path;
use uuid::Uuid;

use crate::database::models::MenuItem;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::MenuService;

/// DELETE /menu/:id - staff/admin; soft delete, the row stays for history
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<MenuItem> {
    let menu = MenuService::new().await?;
    let item = menu
        .soft_delete(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item not found"))?;
    Ok(ApiResponse::success(item))
}
