//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("graphql.uri: '{0}' is not an absolute http(s) URL")]
    InvalidGraphQlUri(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("listener.default_scheme: expected 'http' or 'https', got '{0}'")]
    InvalidScheme(String),

    #[error("{0}: expected a non-empty string")]
    Empty(&'static str),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if !matches!(config.listener.default_scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::InvalidScheme(
            config.listener.default_scheme.clone(),
        ));
    }

    match Url::parse(&config.graphql.uri) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidGraphQlUri(config.graphql.uri.clone())),
    }

    if config.graphql.timeout_ms == 0 {
        errors.push(ValidationError::ZeroValue("graphql.timeout_ms"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.request_secs"));
    }

    if config.observability.log_level.trim().is_empty() {
        errors.push(ValidationError::Empty("observability.log_level"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if let Some(id) = &config.tracking.gtm_container_id {
        if id.trim().is_empty() {
            errors.push(ValidationError::Empty("tracking.gtm_container_id"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.graphql.uri = "ftp://graphql.example.com".into();
        config.timeouts.request_secs = 0;
        config.listener.default_scheme = "gopher".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroValue("timeouts.request_secs")));
        assert!(errors.contains(&ValidationError::InvalidGraphQlUri(
            "ftp://graphql.example.com".into()
        )));
    }

    #[test]
    fn test_relative_graphql_uri_rejected() {
        let mut config = AppConfig::default();
        config.graphql.uri = "/graphql".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidGraphQlUri("/graphql".into())]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_gtm_id_rejected() {
        let mut config = AppConfig::default();
        config.tracking.gtm_container_id = Some("   ".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::Empty("tracking.gtm_container_id")]
        );
    }
}
