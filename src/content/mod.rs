//! Content subsystem.
//!
//! # Data Flow
//! ```text
//! Story page request
//!     → fetcher.rs (StoryQuery, ContentFetcher trait)
//!     → graphql.rs (POST query to content API, map envelope)
//!     → types.rs (ContentItem, request scoped)
//! ```
//!
//! # Design Decisions
//! - The fetcher is a trait object so handlers never depend on the transport
//! - A missing story is an explicit `FetchError::NotFound`, never an empty success
//! - No retries: failures surface immediately

pub mod fetcher;
pub mod graphql;
pub mod types;

pub use fetcher::{ContentFetcher, FetchError, StoryQuery};
pub use graphql::GraphQlFetcher;
pub use types::{AdvertiserRef, ContentItem, ImageRef, PublisherRef};
