//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::PollerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply `DB_*`
/// environment overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<PollerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => PollerConfig::default(),
    };

    apply_env(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Override store settings from `DB_USER`, `DB_PASS`, `DB_HOST`,
/// `DB_PORT` and `DB_NAME`.
pub fn apply_env<F>(config: &mut PollerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let store = &mut config.store;

    if let Some(user) = lookup("DB_USER") {
        store.user = user;
    }
    if let Some(password) = lookup("DB_PASS") {
        store.password = password;
    }
    if let Some(host) = lookup("DB_HOST") {
        store.host = host;
    }
    if let Some(port) = lookup("DB_PORT") {
        store.port = port.parse().map_err(|_| ConfigError::Env {
            var: "DB_PORT",
            value: port.clone(),
        })?;
    }
    if let Some(database) = lookup("DB_NAME") {
        store.database = database;
    }

    Ok(())
}
