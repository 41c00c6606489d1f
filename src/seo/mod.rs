//! Search engine and social embedding support.
//!
//! # Data Flow
//! ```text
//! ContentItem (fetched)
//!     → redirect.rs (requested URL vs canonical URL → RedirectDecision)
//!     → metadata.rs (ContentItem → MetadataSet for the document head)
//! ```
//!
//! # Design Decisions
//! - Both steps are synchronous pure functions of their inputs
//! - Redirects are 301 and only issued in production

pub mod metadata;
pub mod redirect;

pub use metadata::{compose, MetaTag, MetadataSet, TagKind};
pub use redirect::{CanonicalResolver, RedirectDecision};
