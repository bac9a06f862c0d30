use axum::extract::Path;
use uuid::Uuid;

use crate::database::models::MenuItem;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::MenuService;

/// GET /menu - available items only; soft-deleted items are hidden here
pub async fn list() -> ApiResult<Vec<MenuItem>> {
    let menu = MenuService::new().await?;
    let items = menu.list_available().await?;
    Ok(ApiResponse::success(items))
}

/// GET /menu/:id - direct lookup, resolves soft-deleted items too
pub async fn get(Path(id): Path<Uuid>) -> ApiResult<MenuItem> {
    let menu = MenuService::new().await?;
    let item = menu
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item not found"))?;
    Ok(ApiResponse::success(item))
}
