//! HTTP adapter for AI copywriting endpoints.
//!
//! - `POST /api/generate-description` - Listing description
//! - `POST /api/generate-title-suggestions` - Up to five titles

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ContentAppState;
pub use routes::content_router;
