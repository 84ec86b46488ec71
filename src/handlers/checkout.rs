//! Checkout handler.
//!
//! `POST /checkout` charges a payment and records the outcome. The handler
//! unpacks the wire request, hands it to [`CheckoutService`] together with
//! the configured discount, and maps the receipt back to JSON.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::services::checkout::{CheckoutInput, CheckoutService};
use crate::services::user_repo::UserRepository;

/// Shared application state.
pub struct AppState {
    /// Checkout orchestration over the Postgres-backed collaborators
    pub checkout: CheckoutService,
    /// Read-only repository variant serving the lookup endpoints
    pub user_reader: Arc<dyn UserRepository>,
    /// Discount applied to every checkout, passed explicitly per call
    pub discount_percent: f64,
}

/// Request body for `POST /checkout`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Caller-supplied user identifier
    pub user_id: String,
    /// Gross amount before discount; must be positive
    pub amount: f64,
    /// Payment method tag ("stripe", "trial"; unrecognized tags fall back
    /// to stripe)
    pub payment_type: String,
    /// Whether to queue the marketing mail blast after charging
    #[serde(default)]
    pub send_marketing_email: bool,
}

/// Response for a successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub status: String,
    /// The discounted amount that was charged
    pub charged: f64,
}

/// Run a checkout
///
/// POST /checkout
pub async fn checkout(
    state: web::Data<AppState>,
    req: web::Json<CheckoutRequest>,
) -> AppResult<HttpResponse> {
    let req = req.into_inner();
    let input = CheckoutInput {
        user_id: req.user_id,
        amount: req.amount,
        payment_type: req.payment_type,
        send_marketing_email: req.send_marketing_email,
    };

    let receipt = state
        .checkout
        .checkout(&input, state.discount_percent)
        .await?;

    tracing::info!("Checkout for {} charged {}", input.user_id, receipt.charged);

    Ok(HttpResponse::Ok().json(CheckoutResponse {
        status: "ok".to_string(),
        charged: receipt.charged,
    }))
}
