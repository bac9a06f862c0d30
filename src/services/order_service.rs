use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Order, OrderLine, OrderStatus};
use crate::error::ApiError;

use super::menu_service::MenuService;

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Unknown menu item: {0}")]
    UnknownItem(Uuid),
    #[error("Menu item is not available: {0}")]
    ItemUnavailable(Uuid),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Manager(#[from] DatabaseError),
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::UnknownItem(id) => ApiError::not_found(format!("Unknown menu item: {}", id)),
            OrderError::ItemUnavailable(id) => {
                ApiError::bad_request(format!("Menu item is not available: {}", id))
            }
            OrderError::Database(e) => e.into(),
            OrderError::Manager(e) => e.into(),
        }
    }
}

/// Outcome of a client-initiated cancellation attempt
#[derive(Debug)]
pub enum CancelOutcome {
    Cancelled(Order),
    NotPending,
    NotOwner,
    NotFound,
}

pub struct OrderService {
    pool: PgPool,
}

impl OrderService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Create an order for a user. Line prices are snapshotted from the menu
    /// at this moment; a concurrent price change is an accepted race and the
    /// stored snapshot is what the total reflects.
    pub async fn create(
        &self,
        user_id: Uuid,
        requested: &[(Uuid, u32)],
    ) -> Result<Order, OrderError> {
        let menu = MenuService::new().await?;
        let ids: Vec<Uuid> = requested.iter().map(|(id, _)| *id).collect();
        let items = menu.find_by_ids(&ids).await?;

        let mut lines = Vec::with_capacity(requested.len());
        let mut total = Decimal::ZERO;
        for (id, quantity) in requested {
            let item = items
                .iter()
                .find(|i| i.id == *id)
                .ok_or(OrderError::UnknownItem(*id))?;
            if !item.available {
                return Err(OrderError::ItemUnavailable(*id));
            }
            total += item.price * Decimal::from(*quantity);
            lines.push(OrderLine {
                menu_item_id: item.id,
                name: item.name.clone(),
                price: item.price,
                quantity: *quantity,
            });
        }

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (user_id, items, total_amount)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user_id)
        .bind(Json(lines))
        .bind(total)
        .fetch_one(&self.pool)
        .await?;
        Ok(order)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Staff/admin status overwrite. No transition rules beyond what the
    /// route guards enforce; last writer wins.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    /// Client cancellation of their own order, allowed only from `pending`.
    /// The status check and the write are a single conditional UPDATE so a
    /// concurrent staff transition cannot be clobbered.
    pub async fn cancel_own(&self, id: Uuid, user_id: Uuid) -> Result<CancelOutcome, sqlx::Error> {
        let cancelled = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = 'cancelled'
             WHERE id = $1 AND user_id = $2 AND status = 'pending'
             RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(order) = cancelled {
            return Ok(CancelOutcome::Cancelled(order));
        }

        // Zero rows: work out which failure to report
        match self.find_by_id(id).await? {
            None => Ok(CancelOutcome::NotFound),
            Some(order) if order.user_id != user_id => Ok(CancelOutcome::NotOwner),
            Some(_) => Ok(CancelOutcome::NotPending),
        }
    }

    /// Staff/admin cancellation of any order
    pub async fn cancel(&self, id: Uuid) -> Result<Option<Order>, sqlx::Error> {
        self.update_status(id, OrderStatus::Cancelled).await
    }
}
