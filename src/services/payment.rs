//! Payment strategies.
//!
//! A [`PaymentStrategy`] knows how to charge, refund and report for one
//! payment method. Two variants exist:
//! - [`StripeProcessor`] - the chargeable path (a stub collaborator; it logs
//!   the charge instead of calling a real gateway)
//! - [`FreeTrialProcessor`] - trial accounts, which refuse charges and refunds
//!
//! The variant is selected per request from the `paymentType` tag via
//! [`PaymentMethod::from_tag`].

use std::path::Path;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

/// Fixed placeholder payload for the monthly report stub.
const REPORT_PLACEHOLDER: &str = "csv,goes,here\n";

/// Capability set of a payment method.
///
/// `process_payment` and `refund` are the money-moving operations; the
/// remaining three are side-band maintenance actions a method may or may not
/// support. Implementations that do not support an operation fail with
/// [`AppError::UnsupportedOperation`] and perform no side effect.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Charge `amount` to `user_id`.
    async fn process_payment(&self, user_id: &str, amount: f64) -> AppResult<()>;

    /// Refund a previously charged payment.
    async fn refund(&self, payment_id: &str) -> AppResult<()>;

    /// Write the monthly report to `dest`.
    async fn generate_monthly_report(&self, dest: &Path) -> AppResult<()>;

    /// Trigger a database backup.
    async fn backup_database(&self) -> AppResult<()>;

    /// Queue the marketing mail blast.
    async fn send_marketing_emails(&self) -> AppResult<()>;
}

/// Payment strategy for card payments via Stripe.
///
/// No real gateway call is made; the charge is logged and succeeds
/// unconditionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripeProcessor;

#[async_trait]
impl PaymentStrategy for StripeProcessor {
    async fn process_payment(&self, user_id: &str, amount: f64) -> AppResult<()> {
        tracing::info!("Stripe charge {} ${}", user_id, amount);
        Ok(())
    }

    async fn refund(&self, payment_id: &str) -> AppResult<()> {
        tracing::info!("Stripe refund {}", payment_id);
        Ok(())
    }

    async fn generate_monthly_report(&self, dest: &Path) -> AppResult<()> {
        tokio::fs::write(dest, REPORT_PLACEHOLDER)
            .await
            .map_err(|e| AppError::Report(format!("write {}: {}", dest.display(), e)))
    }

    async fn backup_database(&self) -> AppResult<()> {
        tracing::info!("Database backup triggered");
        Ok(())
    }

    async fn send_marketing_emails(&self) -> AppResult<()> {
        tracing::info!("Marketing emails queued for all users");
        Ok(())
    }
}

/// Payment strategy for free-trial accounts.
///
/// Trial accounts cannot be charged or refunded; those operations fail with
/// a distinct [`AppError::UnsupportedOperation`] so callers can tell the
/// refusal apart from other failures. The side-band operations are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeTrialProcessor;

#[async_trait]
impl PaymentStrategy for FreeTrialProcessor {
    async fn process_payment(&self, _user_id: &str, _amount: f64) -> AppResult<()> {
        Err(AppError::UnsupportedOperation(
            "Free trial cannot process payments".to_string(),
        ))
    }

    async fn refund(&self, _payment_id: &str) -> AppResult<()> {
        Err(AppError::UnsupportedOperation(
            "No refunds for free trials".to_string(),
        ))
    }

    async fn generate_monthly_report(&self, _dest: &Path) -> AppResult<()> {
        Ok(())
    }

    async fn backup_database(&self) -> AppResult<()> {
        Ok(())
    }

    async fn send_marketing_emails(&self) -> AppResult<()> {
        Ok(())
    }
}

/// The payment methods the checkout surface accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Stripe,
    FreeTrial,
}

impl PaymentMethod {
    /// Resolves a method from the request's `paymentType` tag.
    ///
    /// Matching is case-insensitive. Unrecognized tags fall back to Stripe;
    /// the fallback is deliberate (the tag is advisory, not an enum on the
    /// wire) and logged so misspelled tags are visible in operation.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "stripe" => PaymentMethod::Stripe,
            "trial" => PaymentMethod::FreeTrial,
            other => {
                tracing::warn!("Unrecognized payment type {:?}, defaulting to stripe", other);
                PaymentMethod::Stripe
            }
        }
    }

    /// Returns the strategy implementing this method.
    pub fn strategy(&self) -> Box<dyn PaymentStrategy> {
        match self {
            PaymentMethod::Stripe => Box::new(StripeProcessor),
            PaymentMethod::FreeTrial => Box::new(FreeTrialProcessor),
        }
    }
}
