//! Backup/report trigger handler.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::AppResult;
use crate::services::payment::PaymentMethod;

/// Acknowledgement returned by the backup trigger.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub status: String,
}

/// Trigger a database backup
///
/// GET /report
///
/// Runs `backup_database` on the Stripe strategy and returns a fixed
/// acknowledgement.
pub async fn run_backup() -> AppResult<HttpResponse> {
    let strategy = PaymentMethod::Stripe.strategy();
    strategy.backup_database().await?;

    Ok(HttpResponse::Ok().json(ReportResponse {
        status: "ok".to_string(),
    }))
}
