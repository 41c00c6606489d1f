//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nativex_requests_total` (counter): requests by method, route, status
//! - `nativex_request_duration_seconds` (histogram): latency distribution
//! - `nativex_story_fetch_total` (counter): content API lookups by outcome
//! - `nativex_redirects_total` (counter): canonical redirect decisions
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("nativex_requests_total", &labels).increment(1);
    metrics::histogram!("nativex_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_story_fetch(outcome: &'static str) {
    metrics::counter!("nativex_story_fetch_total", "outcome" => outcome).increment(1);
}

pub fn record_redirect(decision: &'static str) {
    metrics::counter!("nativex_redirects_total", "decision" => decision).increment(1);
}

/// Middleware recording request count and latency per matched route.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
