//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, origin, query pairs)
//!     → story.rs  (GET /story/{id}: fetch, redirect, render)
//!       assets.rs (GET /favicon.ico, GET /robots.txt)
//!     → response.rs (errors → status + generic body)
//!     → Send to client
//! ```

pub mod assets;
pub mod request;
pub mod response;
pub mod server;
pub mod story;

pub use request::{MakeRequestUuidV4, RequestOrigin, X_REQUEST_ID};
pub use response::AppError;
pub use server::{AppState, HttpServer, ServerError};
