//! HTTP client module
//!
//! Provides the HTTP transport with retry, rate limiting, and backoff
//! strategies. Responses are returned fully read as [`ApiResponse`] so that
//! stream-level validation can classify vendor error payloads.

mod client;
mod rate_limit;

pub use client::{ApiResponse, HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
