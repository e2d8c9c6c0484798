//! Configuration module for the log shipper.
//!
//! This module provides the shipper's destination, credentials and queue
//! settings, either built directly or loaded from environment variables.

use std::env;
use std::time::Duration;

/// Default environment tag attached to every event
const DEFAULT_ENVIRONMENT: &str = "dev";

/// Default number of events buffered before producers block
pub const DEFAULT_QUEUE_CAPACITY: usize = 20;

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Maximum allowed queue capacity to prevent memory issues
const MAX_QUEUE_CAPACITY: usize = 10_000;

/// Minimum request timeout
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout, bounds how long a drain can stall per event
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Configuration for a [`Shipper`](crate::Shipper).
///
/// All settings can be configured via environment variables:
/// - `LOG_SHIPPER_URL`: Ingestion endpoint URL (default: empty)
/// - `LOG_SHIPPER_TOKEN`: Bearer token (default: empty)
/// - `LOG_SHIPPER_ENV`: Environment tag (default: dev)
/// - `LOG_SHIPPER_QUEUE_CAPACITY`: Events buffered before blocking (default: 20)
/// - `LOG_SHIPPER_REQUEST_TIMEOUT_SECS`: HTTP request timeout (default: 5)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipperConfig {
    /// Full URL of the log ingestion endpoint
    pub destination_url: String,

    /// Token sent as `Authorization: Bearer <token>`
    pub auth_token: String,

    /// Value of the `env` field on every event
    pub environment: String,

    /// Number of events the queue holds before producers block
    pub queue_capacity: usize,

    /// HTTP request timeout duration
    pub request_timeout: Duration,
}

/// Error type for configuration loading failures.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable is set but does not parse as an unsigned integer
    NotANumber { var: &'static str, value: String },

    /// The variable parsed but falls outside `min..=max`
    OutOfRange {
        var: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotANumber { var, value } => {
                write!(f, "{}: '{}' is not a valid number", var, value)
            }
            ConfigError::OutOfRange {
                var,
                value,
                min,
                max,
            } => write!(f, "{}: {} is outside {}..={}", var, value, min, max),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ShipperConfig {
    /// Create a configuration with the default queue capacity and timeout.
    ///
    /// No validation is done: an empty URL or token is accepted and only
    /// shows up later as failed deliveries.
    pub fn new(
        destination_url: impl Into<String>,
        auth_token: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            destination_url: destination_url.into(),
            auth_token: auth_token.into(),
            environment: environment.into(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Set the queue capacity. The queue itself buffers at least one event.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `LOG_SHIPPER_QUEUE_CAPACITY` or
    /// `LOG_SHIPPER_REQUEST_TIMEOUT_SECS` is set to something that is not a
    /// number or is out of range.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use log_shipper::config::ShipperConfig;
    ///
    /// let config = ShipperConfig::from_env().expect("Failed to load config");
    /// println!("Shipping to: {}", config.destination_url);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        let destination_url = env::var("LOG_SHIPPER_URL").unwrap_or_default();
        let auth_token = env::var("LOG_SHIPPER_TOKEN").unwrap_or_default();
        let environment =
            env::var("LOG_SHIPPER_ENV").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        let queue_capacity = parse_bounded(
            "LOG_SHIPPER_QUEUE_CAPACITY",
            DEFAULT_QUEUE_CAPACITY as u64,
            1,
            MAX_QUEUE_CAPACITY as u64,
        )? as usize;

        let request_timeout = Duration::from_secs(parse_bounded(
            "LOG_SHIPPER_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
            MIN_REQUEST_TIMEOUT_SECS,
            MAX_REQUEST_TIMEOUT_SECS,
        )?);

        Ok(Self {
            destination_url,
            auth_token,
            environment,
            queue_capacity,
            request_timeout,
        })
    }
}

/// Read `var` as an integer in `min..=max`, or `default` when unset.
fn parse_bounded(var: &'static str, default: u64, min: u64, max: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = env::var(var) else {
        return Ok(default);
    };

    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::NotANumber { var, value: raw.clone() })?;

    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            var,
            value,
            min,
            max,
        });
    }

    Ok(value)
}

impl Default for ShipperConfig {
    /// Configuration with no destination, useful for tests.
    fn default() -> Self {
        Self::new("", "", DEFAULT_ENVIRONMENT)
    }
}
