//! checkout-api - checkout and payment handling API
//!
//! This crate provides a small checkout surface: `POST /checkout` applies a
//! discount, charges through a payment strategy, persists the payment and the
//! user, and sends a confirmation notification. `GET /users/{id}` fetches a
//! user through the read-only repository variant and `GET /report` triggers
//! a backup.
//!
//! # Modules
//!
//! - [`config`] - Application configuration from environment variables
//! - [`db`] - Database connection pool and migrations
//! - [`error`] - Unified error handling
//! - [`models`] - Database models (User, PaymentRecord)
//! - [`services`] - Business logic (checkout orchestration, payment
//!   strategies, repository variants, notifications)
//! - [`handlers`] - HTTP route handlers
//! - [`middleware`] - Rate limiting middleware

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

// Re-export commonly used types at the crate root
pub use config::{Config, ConfigError};
pub use db::{create_pool, run_migrations};
pub use error::{AppError, AppResult};
pub use handlers::AppState;
pub use models::{PaymentRecord, User};
pub use services::{
    CheckoutInput, CheckoutReceipt, CheckoutService, LogNotificationSender, NotificationSender,
    PaymentMethod, PaymentStore, PaymentStrategy, UserRepository,
};
