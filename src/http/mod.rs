//! Outbound HTTP Module
//!
//! Client wrapper and retry policy used for every third-party API call.

mod client;
mod retry;

pub use client::{ApiRequest, FetchError, HttpClientConfig, UpstreamClient};
pub use retry::RetryPolicy;
