use std::env;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    // Discount applied to every checkout, in percent of the gross amount.
    // Captured once at startup and passed explicitly into each checkout call.
    pub discount_percent: f64,
    // Destination for the monthly report written during checkout
    pub report_path: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ok if it doesn't exist)
        // Skip loading .env in test mode to allow tests to control env vars
        if env::var("CHECKOUT_TEST_MODE").is_err() {
            dotenvy::dotenv().ok();
        }

        // Required variables
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        // Optional variables with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .map(|v| {
                v.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                    var: "PORT".to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()?
            .unwrap_or(8080); // Default: 8080

        let discount_percent = env::var("DISCOUNT_PERCENT")
            .ok()
            .map(|v| {
                v.parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                    var: "DISCOUNT_PERCENT".to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()?
            .unwrap_or(3.0); // Default: 3%

        if !(0.0..=100.0).contains(&discount_percent) {
            return Err(ConfigError::InvalidValue {
                var: "DISCOUNT_PERCENT".to_string(),
                message: format!("{} is not in 0..=100", discount_percent),
            });
        }

        let report_path = env::var("REPORT_PATH").unwrap_or_else(|_| "report.csv".to_string());

        Ok(Config {
            database_url,
            host,
            port,
            discount_percent,
            report_path,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
