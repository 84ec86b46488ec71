//! Unified error handling for the checkout-api application.
//!
//! This module provides a centralized error type (`AppError`) that handles
//! all errors throughout the application and maps them to appropriate HTTP responses.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::config::ConfigError;

/// Unified application error type.
///
/// All errors in the application are converted to this type, which implements
/// `actix_web::ResponseError` for automatic HTTP response generation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Checkout amount was zero or negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Operation refused by the selected payment strategy or repository
    /// variant (free-trial charge/refund, read-only save)
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database errors from SQLx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Notification delivery errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// Report/backup file errors
    #[error("Report error: {0}")]
    Report(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedOperation(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_message = match self {
            // For database and internal errors, don't expose internal details
            AppError::Database(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Notification(_) => "Notification delivery failed".to_string(),
            AppError::Report(_) => "Report generation failed".to_string(),
            // For these errors, expose the message
            AppError::InvalidAmount(amount) => {
                format!("Amount must be positive, got {}", amount)
            }
            AppError::UnsupportedOperation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
        };

        let body = serde_json::json!({
            "error": error_message
        });

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
