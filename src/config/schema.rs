//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the web frontend.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default content API endpoint for local development.
pub const DEFAULT_GRAPHQL_URI: &str = "http://host.docker.internal:8100";

/// Root configuration for the web frontend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Execution mode. Canonical redirects are only issued in production.
    pub environment: Environment,

    /// Listener configuration (bind address, origin reconstruction).
    pub listener: ListenerConfig,

    /// Content API settings.
    pub graphql: GraphQlConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Static assets and template locations.
    pub assets: AssetsConfig,

    /// Analytics tracking settings.
    pub tracking: TrackingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Execution mode of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    /// Parse an environment name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "staging" => Some(Environment::Staging),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3005").
    pub bind_address: String,

    /// Honor X-Forwarded-Proto / X-Forwarded-Host when reconstructing the request origin.
    pub trust_proxy: bool,

    /// Scheme used for the request origin when neither the URI nor a trusted proxy supplies one.
    pub default_scheme: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3005".to_string(),
            trust_proxy: false,
            default_scheme: "http".to_string(),
        }
    }
}

/// Content API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphQlConfig {
    /// The public GraphQL URL.
    pub uri: String,

    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_GRAPHQL_URI.to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Static asset and template locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Favicon served verbatim at `/favicon.ico`. A relative path resolves
    /// against the process working directory, not the binary's location.
    pub favicon_path: PathBuf,

    /// Optional directory holding `robots.hbs` / `story.hbs` overrides.
    pub templates_dir: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            favicon_path: PathBuf::from("static/favicon.ico"),
            templates_dir: None,
        }
    }
}

/// Analytics tracking configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TrackingConfig {
    /// Google Tag Manager container id (e.g. "GTM-ABC123"). No GTM snippet when unset.
    pub gtm_container_id: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.graphql.uri, DEFAULT_GRAPHQL_URI);
        assert_eq!(config.listener.default_scheme, "http");
        assert!(!config.listener.trust_proxy);
        assert!(config.tracking.gtm_container_id.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            environment = "production"

            [graphql]
            uri = "https://graphql.example.com"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert!(config.environment.is_production());
        assert_eq!(config.graphql.uri, "https://graphql.example.com");
        assert_eq!(config.graphql.timeout_ms, 5_000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.bind_address, "0.0.0.0:3005");
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PRODUCTION"), Some(Environment::Production));
        assert_eq!(Environment::parse(" dev "), Some(Environment::Development));
        assert_eq!(Environment::parse("staging"), Some(Environment::Staging));
        assert_eq!(Environment::parse("qa"), None);
    }
}
