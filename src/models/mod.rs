//! Data models for the checkout-api application.
//!
//! This module contains the database models used throughout the application:
//! - [`User`] - Represents a user of the checkout surface
//! - [`PaymentRecord`] - Represents one charged payment

pub mod payment;
pub mod user;

pub use payment::PaymentRecord;
pub use user::User;
