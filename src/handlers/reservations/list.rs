use axum::extract::Path;
use uuid::Uuid;

use crate::database::models::Reservation;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ReservationService;

/// GET /reservations - staff/admin; sorted by date and time slot
pub async fn list() -> ApiResult<Vec<Reservation>> {
    let reservations = ReservationService::new().await?;
    let result = reservations.list_all().await?;
    Ok(ApiResponse::success(result))
}

/// GET /reservations/:id - staff/admin
pub async fn get(Path(id): Path<Uuid>) -> ApiResult<Reservation> {
    let reservations = ReservationService::new().await?;
    let reservation = reservations
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reservation not found"))?;
    Ok(ApiResponse::success(reservation))
}
