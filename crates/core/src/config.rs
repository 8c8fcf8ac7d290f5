//! Controller runtime configuration.
//!
//! Configuration is resolved once at startup and passed into the controllers,
//! so no operational path reads process-wide environment variables.

use crate::error::ConfigError;
use std::ops::Range;
use std::time::Duration;

/// The default page size of the list controllers.
const DEFAULT_PAGE_SIZE: u64 = 10;

/// The default busy-retry delay window, in milliseconds.
const DEFAULT_RETRY_WINDOW_MS: Range<u64> = 500..1000;

/// The default cadence of the service health poll.
const DEFAULT_HEALTH_POLL_INTERVAL: Duration = Duration::from_millis(30_000);

/// The default cadence of the treatment view refresh.
const DEFAULT_TREATMENT_REFRESH_INTERVAL: Duration = Duration::from_millis(1500);

/// Configuration shared by the controllers, resolved at startup.
#[derive(Clone, Debug)]
pub struct UiConfig {
    page_size: u64,
    retry_window_ms: Range<u64>,
    health_poll_interval: Duration,
    treatment_refresh_interval: Duration,
}

impl UiConfig {
    /// Create a configuration, validating the tunable values.
    pub fn new(
        page_size: u64,
        retry_window_ms: Range<u64>,
        health_poll_interval: Duration,
        treatment_refresh_interval: Duration,
    ) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if retry_window_ms.is_empty() {
            return Err(ConfigError::InvalidRetryWindow);
        }

        Ok(Self {
            page_size,
            retry_window_ms,
            health_poll_interval,
            treatment_refresh_interval,
        })
    }

    /// Build a configuration from optional environment-style string values,
    /// falling back to the defaults for absent ones.
    pub fn from_env_values(
        page_size: Option<String>,
        health_poll_interval_ms: Option<String>,
    ) -> Result<Self, ConfigError> {
        let page_size = parse_or("PTUI_PAGE_SIZE", page_size, DEFAULT_PAGE_SIZE)?;
        let poll_ms = parse_or(
            "PTUI_HEALTH_POLL_INTERVAL_MS",
            health_poll_interval_ms,
            DEFAULT_HEALTH_POLL_INTERVAL.as_millis() as u64,
        )?;

        Self::new(
            page_size,
            DEFAULT_RETRY_WINDOW_MS,
            Duration::from_millis(poll_ms),
            DEFAULT_TREATMENT_REFRESH_INTERVAL,
        )
    }

    /// The number of items requested per list page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// The delay window, in milliseconds, for the list busy-retry.
    pub fn retry_window_ms(&self) -> Range<u64> {
        self.retry_window_ms.clone()
    }

    /// How often the service health is polled.
    pub fn health_poll_interval(&self) -> Duration {
        self.health_poll_interval
    }

    /// How often an open treatment view refreshes its record.
    pub fn treatment_refresh_interval(&self) -> Duration {
        self.treatment_refresh_interval
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            retry_window_ms: DEFAULT_RETRY_WINDOW_MS,
            health_poll_interval: DEFAULT_HEALTH_POLL_INTERVAL,
            treatment_refresh_interval: DEFAULT_TREATMENT_REFRESH_INTERVAL,
        }
    }
}

fn parse_or(
    name: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<u64, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    match value {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        None => Ok(default),
    }
}
