use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Category, MenuItem};

pub struct MenuService {
    pool: PgPool,
}

impl MenuService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Public listing: soft-deleted (unavailable) items are excluded
    pub async fn list_available(&self) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(
            "SELECT * FROM menu_items WHERE available ORDER BY category, name",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Direct id lookup resolves regardless of availability
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<MenuItem>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        price: Decimal,
        category: Category,
        image: Option<&str>,
    ) -> Result<MenuItem, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(
            "INSERT INTO menu_items (name, description, price, category, image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(image)
        .fetch_one(&self.pool)
        .await
    }

    /// Partial update. `image` is tri-state: `None` keeps the current value,
    /// `Some(None)` clears it, `Some(Some(_))` replaces it.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        category: Option<Category>,
        image: Option<Option<&str>>,
        available: Option<bool>,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(
            "UPDATE menu_items
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 price = COALESCE($4, price),
                 category = COALESCE($5, category),
                 image = CASE WHEN $6 THEN $7 ELSE image END,
                 available = COALESCE($8, available)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(image.is_some())
        .bind(image.flatten())
        .bind(available)
        .fetch_optional(&self.pool)
        .await
    }

    /// Soft delete: flip `available` off, keep the row so past orders and
    /// reservations that reference it stay resolvable
    pub async fn soft_delete(&self, id: Uuid) -> Result<Option<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(
            "UPDATE menu_items SET available = FALSE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
