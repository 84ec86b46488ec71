//! Append-only payment ledger.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppResult;

/// Persistence seam for charged payments.
///
/// The ledger is append-only: every successful checkout records one new row,
/// including repeats of an identical request.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Append one charged payment.
    async fn record(&self, user_id: &str, amount: f64) -> AppResult<()>;
}

/// PostgreSQL-backed payment ledger.
#[derive(Debug, Clone)]
pub struct PgPaymentStore {
    pool: PgPool,
}

impl PgPaymentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentStore for PgPaymentStore {
    async fn record(&self, user_id: &str, amount: f64) -> AppResult<()> {
        sqlx::query("INSERT INTO payments (user_id, amount) VALUES ($1, $2)")
            .bind(user_id)
            .bind(amount)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
