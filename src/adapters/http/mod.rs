//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with `dto`, `handlers` and `routes`;
//! `router` merges them into the served API.

pub mod accounts;
pub mod admin;
pub mod billing;
pub mod content;
pub mod documents;
pub mod engagement;
pub mod error;
pub mod listings;
pub mod messaging;
pub mod middleware;
pub mod ml;
pub mod pricing;
pub mod reviews;
pub mod router;

#[cfg(test)]
pub mod test_support;

// Re-export key types for convenience
pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, app, ApiDependencies};
