use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{
    Reservation, ReservationDish, ReservationType, RESERVATION_TYPES,
};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{NewReservation, ReservationService};
use crate::validation::{validate_payload, FieldRule, Rule};

const DISH_RULES: &[FieldRule] = &[
    FieldRule::new("itemId", Rule::Required),
    FieldRule::new("itemId", Rule::Uuid),
    FieldRule::new("name", Rule::Required),
    FieldRule::new("price", Rule::Required),
    FieldRule::new(
        "price",
        Rule::Range {
            min: Some(0.0),
            max: None,
        },
    ),
    FieldRule::new("quantity", Rule::Required),
    FieldRule::new(
        "quantity",
        Rule::Range {
            min: Some(1.0),
            max: None,
        },
    ),
];

const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required),
    FieldRule::new("email", Rule::Required),
    FieldRule::new("email", Rule::Email),
    FieldRule::new("phone", Rule::Required),
    FieldRule::new("date", Rule::Required),
    FieldRule::new("time", Rule::Required),
    FieldRule::new("type", Rule::Required),
    FieldRule::new("type", Rule::OneOf(RESERVATION_TYPES)),
    // Conditional requiredness keyed on the type discriminator, evaluated
    // against the same payload snapshot
    FieldRule::new(
        "numberOfPeople",
        Rule::RequiredIf {
            field: "type",
            equals: "surPlace",
        },
    ),
    FieldRule::new(
        "numberOfPeople",
        Rule::Range {
            min: Some(1.0),
            max: None,
        },
    ),
    FieldRule::new(
        "address",
        Rule::RequiredIf {
            field: "type",
            equals: "livraison",
        },
    ),
    FieldRule::new("dishes", Rule::Each(DISH_RULES)),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateReservation {
    name: String,
    email: String,
    phone: String,
    date: NaiveDate,
    time: String,
    #[serde(rename = "type")]
    kind: ReservationType,
    number_of_people: Option<i32>,
    address: Option<String>,
    #[serde(default)]
    dishes: Vec<DishRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DishRequest {
    item_id: Uuid,
    name: String,
    price: Decimal,
    quantity: u32,
}

/// POST /reservations - public booking endpoint.
///
/// Dishes arrive with name and price already chosen by the caller's menu
/// view and are stored as-is; the total is the sum of the dish lines.
pub async fn create(Json(payload): Json<Value>) -> ApiResult<Reservation> {
    validate_payload(CREATE_RULES, &payload)?;
    let req: CreateReservation =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let time = parse_time(&req.time)?;

    let dishes: Vec<ReservationDish> = req
        .dishes
        .into_iter()
        .map(|d| ReservationDish {
            item_id: d.item_id,
            name: d.name,
            price: d.price,
            quantity: d.quantity,
        })
        .collect();

    let total_amount = dishes
        .iter()
        .map(|d| d.price * Decimal::from(d.quantity))
        .sum();

    let reservations = ReservationService::new().await?;
    let reservation = reservations
        .create(NewReservation {
            name: req.name,
            email: req.email,
            phone: req.phone,
            date: req.date,
            time,
            kind: req.kind,
            number_of_people: req.number_of_people,
            address: req.address,
            dishes,
            total_amount,
        })
        .await?;

    Ok(ApiResponse::created(reservation))
}

// Accepts "19:30" and "19:30:00"
fn parse_time(s: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| {
            ApiError::validation(vec![crate::error::Violation::new(
                "time",
                "must be a time like 19:30",
            )])
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_time_formats() {
        assert!(parse_time("19:30").is_ok());
        assert!(parse_time("19:30:00").is_ok());
        assert!(parse_time("half past seven").is_err());
    }
}
