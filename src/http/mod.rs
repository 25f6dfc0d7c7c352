//! HTTP layer under the ChartMogul client
//!
//! - Retries with constant, linear or exponential backoff
//! - `Retry-After` handling on 429
//! - Optional token bucket rate limiting (governor)
//! - Credentials applied per request through [`crate::auth`]

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
