//! Native story web frontend library

pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod seo;
pub mod templates;
pub mod tracking;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
