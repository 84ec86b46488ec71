//! Rate limiting middleware using actix-governor.
//!
//! Checkout is a paid action behind a public endpoint, so the whole surface
//! sits behind a per-IP token-bucket limit.

use actix_governor::governor::middleware::NoOpMiddleware;
use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};

/// Type alias for the rate limiter configuration.
pub type RateLimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Type alias for the rate limiter.
pub type RateLimiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Creates a rate limiter configured for 10 requests per minute per IP.
///
/// Each IP gets its own bucket: one token every 6 seconds, bursts of up
/// to 10.
pub fn create_rate_limiter() -> RateLimiter {
    let config: RateLimiterConfig = GovernorConfigBuilder::default()
        .seconds_per_request(6) // 1 request every 6 seconds = 10 per minute
        .burst_size(10)
        .finish()
        .expect("Failed to build rate limiter configuration");

    Governor::new(&config)
}

/// Creates a more permissive rate limiter for development and testing,
/// roughly 60 requests per minute per IP.
#[allow(dead_code)]
pub fn create_dev_rate_limiter() -> RateLimiter {
    let config: RateLimiterConfig = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(60)
        .finish()
        .expect("Failed to build rate limiter configuration");

    Governor::new(&config)
}
