use axum::extract::Path;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ReservationService;

/// DELETE /reservations/:id - staff/admin. Legacy hard delete: reservations
/// are the one entity the system physically removes.
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let reservations = ReservationService::new().await?;
    if !reservations.delete(id).await? {
        return Err(ApiError::not_found("Reservation not found"));
    }
    Ok(ApiResponse::success(json!({ "deleted": true, "id": id })))
}
