//! Services module - business logic and external collaborators.
//!
//! This module contains:
//! - `checkout`: the checkout orchestration
//! - `notify`: notification delivery (collaborator stub)
//! - `payment`: payment strategies (Stripe and free trial)
//! - `payment_store`: append-only payment ledger
//! - `user_repo`: user repository variants (writable and read-only)

pub mod checkout;
pub mod notify;
pub mod payment;
pub mod payment_store;
pub mod user_repo;

// Re-export commonly used types for convenience
pub use checkout::{discounted_amount, CheckoutInput, CheckoutReceipt, CheckoutService};
pub use notify::{LogNotificationSender, NotificationSender};
pub use payment::{FreeTrialProcessor, PaymentMethod, PaymentStrategy, StripeProcessor};
pub use payment_store::{PaymentStore, PgPaymentStore};
pub use user_repo::{PgUserRepository, ReadOnlyUserRepository, UserRepository};
