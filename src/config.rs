//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::http::{HttpClientConfig, RetryPolicy};

/// Cheapest bcrypt work factor the hasher accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Most expensive bcrypt work factor the hasher accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLx connection string for the relational store
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub database_max_connections: u32,
    /// Base URL of the Overpass API
    pub overpass_base_url: String,
    /// Base URL of the Google Places API
    pub places_base_url: String,
    /// Google Places API key, if any
    pub google_api_key: Option<String>,
    /// User-Agent sent on every outbound call
    pub user_agent: String,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Body read timeout in milliseconds
    pub read_timeout_ms: u64,
    /// Request write timeout in milliseconds
    pub write_timeout_ms: u64,
    /// Largest Overpass response body kept in memory
    pub max_in_memory_size: usize,
    /// Largest Places response body (photos included) kept in memory
    pub places_max_in_memory_size: usize,
    /// Retries after the first attempt for transient failures
    pub retry_max: u32,
    /// First backoff delay in milliseconds
    pub retry_base_delay_ms: u64,
    /// Jitter as a fraction of each backoff delay
    pub retry_jitter: f64,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `DATABASE_URL` - database connection string (default: local SQLite file)
    /// - `DATABASE_MAX_CONNECTIONS` - pool size (default: 5)
    /// - `OVERPASS_BASE_URL` - Overpass endpoint (default: public instance)
    /// - `PLACES_BASE_URL` - Google Places endpoint
    /// - `GOOGLE_API_KEY` - Google Places key (default: unset)
    /// - `APP_USER_AGENT` - outbound User-Agent
    /// - `HTTP_CONNECT_TIMEOUT_MS` / `HTTP_READ_TIMEOUT_MS` / `HTTP_WRITE_TIMEOUT_MS`
    /// - `HTTP_MAX_IN_MEMORY_SIZE_BYTES` / `PLACES_MAX_IN_MEMORY_SIZE_BYTES`
    /// - `HTTP_RETRY_MAX` / `HTTP_RETRY_BASE_DELAY_MS` / `HTTP_RETRY_JITTER`
    /// - `BCRYPT_COST` - password hashing work factor (default: 12)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            overpass_base_url: env::var("OVERPASS_BASE_URL")
                .unwrap_or(defaults.overpass_base_url),
            places_base_url: env::var("PLACES_BASE_URL").unwrap_or(defaults.places_base_url),
            google_api_key: env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            user_agent: env::var("APP_USER_AGENT").unwrap_or(defaults.user_agent),
            connect_timeout_ms: parse_var("HTTP_CONNECT_TIMEOUT_MS")
                .unwrap_or(defaults.connect_timeout_ms),
            read_timeout_ms: parse_var("HTTP_READ_TIMEOUT_MS").unwrap_or(defaults.read_timeout_ms),
            write_timeout_ms: parse_var("HTTP_WRITE_TIMEOUT_MS")
                .unwrap_or(defaults.write_timeout_ms),
            max_in_memory_size: parse_var("HTTP_MAX_IN_MEMORY_SIZE_BYTES")
                .unwrap_or(defaults.max_in_memory_size),
            places_max_in_memory_size: parse_var("PLACES_MAX_IN_MEMORY_SIZE_BYTES")
                .unwrap_or(defaults.places_max_in_memory_size),
            retry_max: parse_var("HTTP_RETRY_MAX").unwrap_or(defaults.retry_max),
            retry_base_delay_ms: parse_var("HTTP_RETRY_BASE_DELAY_MS")
                .unwrap_or(defaults.retry_base_delay_ms),
            retry_jitter: parse_var("HTTP_RETRY_JITTER").unwrap_or(defaults.retry_jitter),
            bcrypt_cost: parse_var("BCRYPT_COST")
                .filter(|cost| (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(cost))
                .unwrap_or(defaults.bcrypt_cost),
        }
    }

    /// Retry policy shared by every upstream client.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max,
            Duration::from_millis(self.retry_base_delay_ms),
            self.retry_jitter,
        )
    }

    /// Client settings for the Overpass API.
    pub fn overpass_client(&self) -> HttpClientConfig {
        self.client_config(&self.overpass_base_url, self.max_in_memory_size)
    }

    /// Client settings for the Google Places API.
    pub fn places_client(&self) -> HttpClientConfig {
        self.client_config(&self.places_base_url, self.places_max_in_memory_size)
    }

    fn client_config(&self, base_url: &str, max_body_bytes: usize) -> HttpClientConfig {
        HttpClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            write_timeout: Duration::from_millis(self.write_timeout_ms),
            max_body_bytes,
            retry: self.retry_policy(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            database_url: "sqlite://tourist_guide.db?mode=rwc".to_string(),
            database_max_connections: 5,
            overpass_base_url: "https://overpass-api.de/api".to_string(),
            places_base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            google_api_key: None,
            user_agent: "TouristGuideApp/1.0 (contact@example.com)".to_string(),
            connect_timeout_ms: 5_000,
            read_timeout_ms: 15_000,
            write_timeout_ms: 15_000,
            max_in_memory_size: 1024 * 1024,
            places_max_in_memory_size: 10 * 1024 * 1024,
            retry_max: 2,
            retry_base_delay_ms: 1_000,
            retry_jitter: 0.3,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}
