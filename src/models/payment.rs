//! Payment record model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One charged payment as persisted in the `payments` table.
///
/// The ledger is append-only: repeating an identical checkout writes a second
/// independent row. There is no idempotency key and no dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PaymentRecord {
    /// The user the amount was charged to
    pub user_id: String,

    /// The charged (already discounted) amount
    pub amount: f64,
}

impl PaymentRecord {
    pub fn new(user_id: impl Into<String>, amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
        }
    }
}
