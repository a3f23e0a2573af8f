//! HTTP client module
//!
//! Provides the transport every resource call goes through.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Credentials applied to every attempt
//! - **Raw Responses**: Status, headers and body kept for the raw interfaces

mod client;
mod rate_limit;
mod response;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use response::{error_from_body, RawResponse};

#[cfg(test)]
mod tests;
