//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Bind server to listener
//! - Stop on the shutdown signal

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::content::ContentFetcher;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::{assets, story};
use crate::observability::metrics;
use crate::seo::CanonicalResolver;
use crate::templates::{TemplateLoadError, Templates};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub fetcher: Arc<dyn ContentFetcher>,
    pub templates: Arc<Templates>,
    pub resolver: CanonicalResolver,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Templates(#[from] TemplateLoadError),
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

/// HTTP server for the story frontend.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and content source.
    pub fn new(config: AppConfig, fetcher: Arc<dyn ContentFetcher>) -> Result<Self, ServerError> {
        let templates = Templates::load(config.assets.templates_dir.as_deref())?;
        let config = Arc::new(config);

        let state = AppState {
            resolver: CanonicalResolver::new(config.environment),
            config: config.clone(),
            fetcher,
            templates: Arc::new(templates),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/story/{id}", get(story::story_page))
            .route("/_health", get(health))
            .merge(assets::routes(&config.assets.favicon_path))
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = request_id(request.headers()).unwrap_or("unknown"),
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The router, for embedding or driving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// `GET /_health`
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
