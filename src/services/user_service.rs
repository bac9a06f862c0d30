use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Role, User};
use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Email already registered: {0}")]
    EmailTaken(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(email) => {
                ApiError::conflict(format!("Email already registered: {}", email))
            }
            UserError::Database(e) => e.into(),
        }
    }
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Insert a new account. Email uniqueness is checked up front and backed
    /// by the unique index, so a concurrent duplicate still maps to a conflict.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        salary: Option<Decimal>,
    ) -> Result<User, UserError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(UserError::EmailTaken(email.to_string()));
        }

        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role, salary)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(salary)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(UserError::EmailTaken(email.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn list_staff(&self) -> Result<Vec<User>, UserError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role IN ('staff', 'admin') ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Update name and salary of a staff account
    pub async fn update_staff(
        &self,
        id: Uuid,
        name: Option<&str>,
        salary: Option<Decimal>,
    ) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET name = COALESCE($2, name),
                 salary = COALESCE($3, salary)
             WHERE id = $1 AND role IN ('staff', 'admin')
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(salary)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Change an account's role in a single atomic statement. Salary is set
    /// for salaried roles and cleared when demoting to client.
    pub async fn update_role(
        &self,
        id: Uuid,
        role: Role,
        salary: Option<Decimal>,
    ) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET role = $2,
                 salary = CASE WHEN $2 IN ('staff', 'admin') THEN COALESCE($3, salary) ELSE NULL END
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(role)
        .bind(salary)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// "Delete" a staff account: accounts are never removed, the row is
    /// demoted back to client and its salary cleared.
    pub async fn demote_staff(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET role = 'client', salary = NULL
             WHERE id = $1 AND role IN ('staff', 'admin')
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
