use axum::extract::Path;
use axum::Extension;
use uuid::Uuid;

use crate::database::models::{Order, Role};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::OrderService;

/// GET /orders - staff/admin see every order, clients only their own.
/// Newest first.
pub async fn list(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Vec<Order>> {
    let orders = OrderService::new().await?;
    let result = match auth_user.role {
        Role::Staff | Role::Admin => orders.list_all().await?,
        Role::Client => orders.list_for_user(auth_user.id).await?,
    };
    Ok(ApiResponse::success(result))
}

/// GET /orders/:id - ownership enforced for clients
pub async fn get(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Order> {
    let orders = OrderService::new().await?;
    let order = orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;

    if auth_user.role == Role::Client && order.user_id != auth_user.id {
        return Err(ApiError::forbidden("You do not own this order"));
    }

    Ok(ApiResponse::success(order))
}
