//! User model for the checkout store.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user record as persisted in the `users` table.
///
/// Users are created (or their email refreshed) as the final persistence step
/// of a checkout, and fetched by id via `GET /users/{id}`. The id is a
/// caller-supplied opaque string; there are no update or delete paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Caller-supplied user identifier
    pub id: String,

    /// The user's email address
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }

    /// Builds the record upserted during checkout, with the address the
    /// confirmation notification is sent to: `user+{id}@example.com`.
    pub fn with_derived_email(id: &str) -> Self {
        Self {
            id: id.to_string(),
            email: format!("user+{}@example.com", id),
        }
    }
}
