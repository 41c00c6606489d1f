//! Error responses.
//!
//! # Design Decisions
//! - Every handler error funnels through `AppError`
//! - Clients get a generic message; details go to the log

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::content::FetchError;

#[derive(Debug, Error)]
pub enum AppError {
    /// No content for the requested identifier.
    #[error("{0}")]
    NotFound(String),

    /// The content API failed.
    #[error(transparent)]
    Upstream(FetchError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("render failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(_) => AppError::NotFound(err.to_string()),
            other => AppError::Upstream(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Render(_) | AppError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Page not found",
            AppError::Upstream(_) => "Upstream content service error",
            AppError::BadRequest(_) => "Bad request",
            AppError::Render(_) | AppError::Serialize(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request rejected");
        }
        (status, self.public_message()).into_response()
    }
}
