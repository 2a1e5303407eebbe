//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, Role, User, UserChanges};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, birth_at, role, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    birth_at: Option<NaiveDate>,
    role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::try_from(row.role).map_err(|raw| {
            tracing::error!(user_id = row.id, role = raw, "Unknown role stored");
            AppError::internal("Corrupt user record", json!({"id": row.id}))
        })?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            birth_at: row.birth_at,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL repository for user accounts.
///
/// E-mail uniqueness is enforced by the `users_email_key` constraint; a
/// violation surfaces as [`AppError::Conflict`].
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, birth_at, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.birth_at)
        .bind(new_user.role.as_i16())
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
                .fetch_all(self.pool.as_ref())
                .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, AppError> {
        let update_birth_at = changes.birth_at.is_some();
        let new_birth_at = changes.birth_at.flatten();

        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                name          = COALESCE($2::TEXT, name),
                email         = COALESCE($3::TEXT, email),
                password_hash = COALESCE($4::TEXT, password_hash),
                birth_at      = CASE WHEN $5 THEN $6::DATE ELSE birth_at END,
                role          = COALESCE($7::SMALLINT, role),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(update_birth_at)
        .bind(new_birth_at)
        .bind(changes.role.map(Role::as_i16))
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(User::try_from)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("User {id} does not exist"), json!({"id": id})))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_admins(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(Role::Admin.as_i16())
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
