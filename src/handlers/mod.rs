//! HTTP handlers for the checkout-api application.
//!
//! This module contains all the route handlers:
//! - `checkout` - the checkout endpoint and shared application state
//! - `health` - Health check endpoint
//! - `report` - backup/report trigger endpoint
//! - `users` - user lookup endpoint (read-only)

pub mod checkout;
pub mod health;
pub mod report;
pub mod users;

// Re-export commonly used types
pub use checkout::{checkout, AppState, CheckoutRequest, CheckoutResponse};
pub use health::{health_check, HealthResponse};
pub use report::{run_backup, ReportResponse};
pub use users::get_user;
