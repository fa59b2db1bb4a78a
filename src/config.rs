//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Redis URL; when unset the cache and event bus are in-process
    pub redis_url: Option<String>,
    /// Base URL of the profile service
    pub customer_service_url: String,
    /// Per-request timeout for profile service calls, in seconds
    pub downstream_timeout_secs: u64,
    /// Redis stream receiving review events
    pub review_stream: String,
    /// Capacity of the in-memory settings cache
    pub max_cache_entries: usize,
    /// In-memory cache sweep interval in seconds
    pub cleanup_interval: u64,
    /// Population jobs that may wait for a writer
    pub populate_queue_capacity: usize,
    /// Population writes allowed in flight
    pub populate_concurrency: usize,
    pub log_format: LogFormat,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REDIS_URL` - Redis URL (default: unset, in-process backends)
    /// - `CUSTOMER_SERVICE_URL` - profile service base URL (default: http://localhost:50051)
    /// - `DOWNSTREAM_TIMEOUT_SECS` - profile service timeout (default: 5)
    /// - `REVIEW_STREAM` - review event stream (default: reviews.raw)
    /// - `MAX_CACHE_ENTRIES` - in-memory cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - in-memory sweep frequency in seconds (default: 30)
    /// - `POPULATE_QUEUE_CAPACITY` - population queue size (default: 1024)
    /// - `POPULATE_CONCURRENCY` - concurrent population writes (default: 32)
    /// - `LOG_FORMAT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            customer_service_url: env::var("CUSTOMER_SERVICE_URL")
                .unwrap_or(defaults.customer_service_url),
            downstream_timeout_secs: env_or(
                "DOWNSTREAM_TIMEOUT_SECS",
                defaults.downstream_timeout_secs,
            ),
            review_stream: env::var("REVIEW_STREAM").unwrap_or(defaults.review_stream),
            max_cache_entries: env_or("MAX_CACHE_ENTRIES", defaults.max_cache_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            populate_queue_capacity: env_or(
                "POPULATE_QUEUE_CAPACITY",
                defaults.populate_queue_capacity,
            ),
            populate_concurrency: env_or("POPULATE_CONCURRENCY", defaults.populate_concurrency),
            log_format: env_or("LOG_FORMAT", defaults.log_format),
        }
    }

    pub fn downstream_timeout(&self) -> Duration {
        Duration::from_secs(self.downstream_timeout_secs.max(1))
    }

    pub fn cleanup_period(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            redis_url: None,
            customer_service_url: "http://localhost:50051".to_string(),
            downstream_timeout_secs: 5,
            review_stream: "reviews.raw".to_string(),
            max_cache_entries: 10_000,
            cleanup_interval: 30,
            populate_queue_capacity: 1024,
            populate_concurrency: 32,
            log_format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert!(config.redis_url.is_none());
        assert_eq!(config.review_stream, "reviews.raw");
        assert_eq!(config.populate_queue_capacity, 1024);
        assert_eq!(config.downstream_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("SETTINGS_GATEWAY_TEST_PORT", "not-a-port");
        assert_eq!(env_or("SETTINGS_GATEWAY_TEST_PORT", 3000u16), 3000);

        env::set_var("SETTINGS_GATEWAY_TEST_PORT", "8081");
        assert_eq!(env_or("SETTINGS_GATEWAY_TEST_PORT", 3000u16), 8081);
        env::remove_var("SETTINGS_GATEWAY_TEST_PORT");
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_zero_intervals_are_clamped() {
        let config = Config {
            cleanup_interval: 0,
            downstream_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.cleanup_period(), Duration::from_secs(1));
        assert_eq!(config.downstream_timeout(), Duration::from_secs(1));
    }
}
