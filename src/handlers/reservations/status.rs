use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{Reservation, ReservationStatus, RESERVATION_STATUSES};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ReservationService;
use crate::validation::{validate_payload, FieldRule, Rule};

const STATUS_RULES: &[FieldRule] = &[
    FieldRule::new("status", Rule::Required),
    FieldRule::new("status", Rule::OneOf(RESERVATION_STATUSES)),
];

#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: ReservationStatus,
}

/// PATCH /reservations/:id/status - staff/admin
pub async fn update_status(
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> ApiResult<Reservation> {
    validate_payload(STATUS_RULES, &payload)?;
    let req: StatusRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let reservations = ReservationService::new().await?;
    let reservation = reservations
        .update_status(id, req.status)
        .await?
        .ok_or_else(|| ApiError::not_found("Reservation not found"))?;

    Ok(ApiResponse::success(reservation))
}
