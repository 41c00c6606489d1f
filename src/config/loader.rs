//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{AppConfig, Environment, LogFormat};
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

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment overrides and validate.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Parse a TOML document into a configuration (no validation).
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides using the given lookup.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(value) = get("APP_ENV") {
        config.environment = Environment::parse(&value).ok_or(ConfigError::Env {
            var: "APP_ENV",
            value,
        })?;
    }
    if let Some(value) = get("BIND_ADDRESS") {
        config.listener.bind_address = value.trim().to_string();
    }
    if let Some(value) = get("TRUST_PROXY") {
        config.listener.trust_proxy = parse_bool("TRUST_PROXY", value)?;
    }
    if let Some(value) = get("GRAPHQL_URI") {
        config.graphql.uri = value.trim().to_string();
    }
    if let Some(value) = get("GRAPHQL_TIMEOUT_MS") {
        config.graphql.timeout_ms = value.trim().parse().map_err(|_| ConfigError::Env {
            var: "GRAPHQL_TIMEOUT_MS",
            value,
        })?;
    }
    if let Some(value) = get("LOG_LEVEL") {
        config.observability.log_level = value.trim().to_string();
    }
    if let Some(value) = get("LOG_FORMAT") {
        config.observability.log_format = match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => {
                return Err(ConfigError::Env {
                    var: "LOG_FORMAT",
                    value,
                })
            }
        };
    }
    if let Some(value) = get("METRICS_ENABLED") {
        config.observability.metrics_enabled = parse_bool("METRICS_ENABLED", value)?;
    }
    if let Some(value) = get("METRICS_ADDRESS") {
        config.observability.metrics_address = value.trim().to_string();
    }
    if let Some(value) = get("GTM_CONTAINER_ID") {
        config.tracking.gtm_container_id = Some(value.trim().to_string());
    }

    Ok(())
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "on" | "1" => Ok(true),
        "false" | "f" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::Env { var, value }),
    }
}
