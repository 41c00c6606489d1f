//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Select JSON or pretty output
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level when set
//! - Initialization is idempotent so tests and embedders can call it freely

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Build the filter: `RUST_LOG` if present, otherwise the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level.trim();
        if level.contains('=') {
            EnvFilter::new(level)
        } else {
            EnvFilter::new(format!("nativex_web={level},tower_http={level},warn"))
        }
    })
}

/// Install the global subscriber. Returns false if one was already installed.
pub fn init(config: &ObservabilityConfig) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
    };

    result.is_ok()
}
