//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and collects every
//! problem instead of stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::PollerConfig;

/// Upper bound for the interval, deadline and probe timeout (one day).
pub const MAX_SCHEDULE_SECS: u64 = 24 * 60 * 60;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{field} must be at most {max} seconds")]
    TooLarge { field: &'static str, max: u64 },

    #[error("store.table '{0}' is not a plain identifier")]
    InvalidTable(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check `config`, returning all problems found.
pub fn validate_config(config: &PollerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let store = &config.store;
    for (field, value) in [
        ("store.host", &store.host),
        ("store.user", &store.user),
        ("store.database", &store.database),
        ("store.table", &store.table),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::Empty(field));
        }
    }
    if !store.table.is_empty() && !is_identifier(&store.table) {
        errors.push(ValidationError::InvalidTable(store.table.clone()));
    }
    if store.port == 0 {
        errors.push(ValidationError::Zero("store.port"));
    }
    if store.max_connections == 0 {
        errors.push(ValidationError::Zero("store.max_connections"));
    }
    if store.max_lifetime_secs == 0 {
        errors.push(ValidationError::Zero("store.max_lifetime_secs"));
    }

    let poller = &config.poller;
    for (field, value) in [
        ("poller.interval_secs", poller.interval_secs),
        ("poller.cycle_deadline_secs", poller.cycle_deadline_secs),
        ("poller.probe_timeout_secs", poller.probe_timeout_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        } else if value > MAX_SCHEDULE_SECS {
            errors.push(ValidationError::TooLarge {
                field,
                max: MAX_SCHEDULE_SECS,
            });
        }
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(obs.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_identifier(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
