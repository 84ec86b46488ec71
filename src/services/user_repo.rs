//! User repository variants.
//!
//! [`UserRepository`] is the persistence seam for user records. The default
//! [`PgUserRepository`] is writable; [`ReadOnlyUserRepository`] serves the
//! lookup endpoints and rejects every write with a distinct error kind, so
//! callers can tell "repository is read-only" apart from storage failures.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::User;

/// Persistence operations on user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user record.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Fetch a user by id.
    async fn get_by_id(&self, id: &str) -> AppResult<Option<User>>;
}

/// Shared lookup both variants delegate to.
async fn fetch_by_id(pool: &PgPool, id: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, email FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Writable user repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    /// Upserts the record: a duplicate id overwrites the stored email rather
    /// than erroring, so re-running a checkout for the same user is fine.
    async fn save(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email)
            VALUES ($1, $2)
            ON CONFLICT (id)
            DO UPDATE SET email = EXCLUDED.email
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<User>> {
        fetch_by_id(&self.pool, id).await
    }
}

/// Read-only user repository for the lookup endpoints.
///
/// `save` always fails with [`AppError::UnsupportedOperation`] and never
/// touches the store.
#[derive(Debug, Clone)]
pub struct ReadOnlyUserRepository {
    pool: PgPool,
}

impl ReadOnlyUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for ReadOnlyUserRepository {
    async fn save(&self, _user: &User) -> AppResult<()> {
        Err(AppError::UnsupportedOperation(
            "Read-only user repository cannot save".to_string(),
        ))
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<User>> {
        fetch_by_id(&self.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // A lazy pool never opens a connection unless a query runs, which lets
    // these tests prove that the read-only variant rejects writes before
    // reaching the database.
    fn unconnected_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .expect("lazy pool")
    }

    #[actix_web::test]
    async fn test_read_only_save_always_fails() {
        let repo = ReadOnlyUserRepository::new(unconnected_pool());

        let err = repo
            .save(&User::with_derived_email("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedOperation(_)));

        // Any input is rejected the same way
        let err = repo.save(&User::new("", "")).await.unwrap_err();
        assert!(matches!(err, AppError::UnsupportedOperation(_)));
    }
}
