//! Configuration schema definitions.
//!
//! All sections default, so an empty file (or no file) is a valid config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the poller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PollerConfig {
    /// Target store connection settings.
    pub store: StoreConfig,

    /// Tick interval and deadlines.
    pub poller: ScheduleConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// MySQL target store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,

    /// Table holding `id` and `url` columns.
    pub table: String,

    /// Maximum open connections in the pool.
    pub max_connections: u32,

    /// Maximum lifetime of a pooled connection in seconds.
    pub max_lifetime_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "monitor".to_string(),
            table: "urls".to_string(),
            max_connections: 10,
            max_lifetime_secs: 180,
        }
    }
}

/// Polling schedule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Period between cycles in seconds.
    pub interval_secs: u64,

    /// How long a cycle waits for its probes, in seconds.
    pub cycle_deadline_secs: u64,

    /// Per-request timeout in seconds.
    pub probe_timeout_secs: u64,
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn cycle_deadline(&self) -> Duration {
        Duration::from_secs(self.cycle_deadline_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            cycle_deadline_secs: 15,
            probe_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
