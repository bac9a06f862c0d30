use axum::extract::Path;
use axum::Extension;
use uuid::Uuid;

use crate::database::models::{Order, Role};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CancelOutcome, OrderService};

/// DELETE /orders/:id - cancellation, never row removal.
///
/// Staff/admin may cancel any order from any state. A client may cancel
/// only their own order and only while it is still pending; the check and
/// the write happen in one conditional UPDATE.
pub async fn cancel(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Order> {
    let orders = OrderService::new().await?;

    if matches!(auth_user.role, Role::Staff | Role::Admin) {
        let order = orders
            .cancel(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order not found"))?;
        return Ok(ApiResponse::success(order));
    }

    match orders.cancel_own(id, auth_user.id).await? {
        CancelOutcome::Cancelled(order) => Ok(ApiResponse::success(order)),
        CancelOutcome::NotFound => Err(ApiError::not_found("Order not found")),
        CancelOutcome::NotOwner => Err(ApiError::forbidden("You do not own this order")),
        CancelOutcome::NotPending => {
            Err(ApiError::bad_request("Only pending orders can be cancelled"))
        }
    }
}
