//! Static routes: favicon and robots policy.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::json;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{services::ServeFile, set_header::SetResponseHeaderLayer};

use crate::http::request::RequestOrigin;
use crate::http::response::AppError;
use crate::http::server::AppState;
use crate::templates;

const FAVICON_CACHE_CONTROL: &str = "public, max-age=86400";

/// Routes for `/favicon.ico` and `/robots.txt`.
pub fn routes(favicon_path: &Path) -> Router<AppState> {
    favicon_present(favicon_path);

    let favicon = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static(FAVICON_CACHE_CONTROL),
        ))
        .service(ServeFile::new(favicon_path));

    Router::new()
        .route_service("/favicon.ico", favicon)
        .route("/robots.txt", get(robots_txt))
}

/// Whether the favicon file exists. Logs a warning when it does not, since
/// `/favicon.ico` then answers 404.
pub fn favicon_present(path: &Path) -> bool {
    let present = path.is_file();
    if !present {
        tracing::warn!(
            path = %path.display(),
            "Favicon file not found; relative paths resolve against the working directory"
        );
    }
    present
}

/// `GET /robots.txt`
async fn robots_txt(
    State(state): State<AppState>,
    origin: RequestOrigin,
) -> Result<impl IntoResponse, AppError> {
    let body = state
        .templates
        .render(templates::ROBOTS, &json!({ "uri": origin.to_string() }))?;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
