use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const RESERVATION_STATUSES: &[&str] =
    &["pending", "confirmed", "rejected", "delivered", "completed"];
pub const RESERVATION_TYPES: &[&str] = &["surPlace", "livraison"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Delivered,
    Completed,
}

/// Dine-in vs delivery. Wire names keep the original camelCase vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_type")]
pub enum ReservationType {
    #[sqlx(rename = "sur_place")]
    #[serde(rename = "surPlace")]
    SurPlace,
    #[sqlx(rename = "livraison")]
    #[serde(rename = "livraison")]
    Livraison,
}

/// A dish attached to a reservation, snapshotted by name and price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDish {
    pub item_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub kind: ReservationType,
    pub number_of_people: Option<i32>,
    pub address: Option<String>,
    pub dishes: Json<Vec<ReservationDish>>,
    pub total_amount: Decimal,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}
