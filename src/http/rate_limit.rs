//! Rate limiting implementation
//!
//! Uses the governor crate for token bucket rate limiting. The vendor API
//! enforces per-account request quotas, so the default is conservative.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Configuration for rate limiting
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 5,
            burst_size: 5,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        let one = NonZeroU32::new(1).unwrap();
        let quota =
            Quota::per_second(NonZeroU32::new(config.requests_per_second).unwrap_or(one))
                .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(one));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made (blocks)
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_rate_limiter_config_default() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.requests_per_second, 5);
        assert_eq!(config.burst_size, 5);
    }

    #[test]
    fn test_rate_limiter_allows_burst() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(10, 5));

        for _ in 0..5 {
            assert!(limiter.try_acquire());
        }
    }

    #[tokio::test]
    async fn test_rate_limiter_wait() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(100, 10));

        // Should complete without blocking (within burst)
        limiter.wait().await;
    }
}
