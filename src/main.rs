//! checkout-api - Main application entry point
//!
//! Wires the Postgres-backed collaborators into the checkout orchestration
//! and serves the HTTP surface: checkout, user lookup, report trigger and
//! health check.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_api::config::Config;
use checkout_api::db::{create_pool, run_migrations};
use checkout_api::handlers::{checkout, get_user, health_check, run_backup, AppState};
use checkout_api::middleware::create_rate_limiter;
use checkout_api::services::{
    CheckoutService, LogNotificationSender, PgPaymentStore, PgUserRepository,
    ReadOnlyUserRepository,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checkout_api=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = Config::from_env().expect("Failed to load configuration");
    let server_addr = config.server_addr();

    // Create database connection pool
    let pool = create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Database connection pool created");

    // Run database migrations
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Wire the checkout orchestration over the Postgres-backed collaborators
    let checkout_service = CheckoutService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgPaymentStore::new(pool.clone())),
        Arc::new(LogNotificationSender),
        config.report_path.clone(),
    );

    // Lookup endpoints go through the read-only repository variant
    let app_state = web::Data::new(AppState {
        checkout: checkout_service,
        user_reader: Arc::new(ReadOnlyUserRepository::new(pool)),
        discount_percent: config.discount_percent,
    });

    tracing::info!(
        "Starting server at http://{} (discount: {}%)",
        server_addr,
        config.discount_percent
    );

    HttpServer::new(move || {
        // Create rate limiter for each worker (Governor doesn't implement Clone)
        let rate_limiter = create_rate_limiter();

        App::new()
            .app_data(app_state.clone())
            // Request logging
            .wrap(Logger::default())
            // Distributed tracing
            .wrap(tracing_actix_web::TracingLogger::default())
            // Rate limiting
            .wrap(rate_limiter)
            .route("/health", web::get().to(health_check))
            .route("/checkout", web::post().to(checkout))
            .route("/users/{id}", web::get().to(get_user))
            .route("/report", web::get().to(run_backup))
    })
    .bind(&server_addr)?
    .run()
    .await
}
