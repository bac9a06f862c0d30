use crate::database::models::Order;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::OrderService;

/// GET /admin/orders - every order, newest first
pub async fn orders() -> ApiResult<Vec<Order>> {
    let orders = OrderService::new().await?;
    let result = orders.list_all().await?;
    Ok(ApiResponse::success(result))
}
