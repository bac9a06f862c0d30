use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Reservation, ReservationDish, ReservationStatus, ReservationType};

pub struct NewReservation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub kind: ReservationType,
    pub number_of_people: Option<i32>,
    pub address: Option<String>,
    pub dishes: Vec<ReservationDish>,
    pub total_amount: Decimal,
}

pub struct ReservationService {
    pool: PgPool,
}

impl ReservationService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Persist a reservation with default status `pending`. Conditional
    /// requiredness (people count / address) is the validator's job upstream.
    pub async fn create(&self, new: NewReservation) -> Result<Reservation, sqlx::Error> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations
                 (name, email, phone, date, time, kind, number_of_people, address, dishes, total_amount)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.date)
        .bind(new.time)
        .bind(new.kind)
        .bind(new.number_of_people)
        .bind(new.address)
        .bind(Json(new.dishes))
        .bind(new.total_amount)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// All reservations, soonest slot first
    pub async fn list_all(&self) -> Result<Vec<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY date, time")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    /// Legacy hard delete; the only entity the system physically removes
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
