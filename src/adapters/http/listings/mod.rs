//! HTTP adapter for listing endpoints.
//!
//! - `GET /api/properties` - Active listings, filtered by query string
//! - `POST /api/properties` - Publish a listing (consumes a credit)
//! - `GET|PUT|DELETE /api/properties/:id` - Single listing, owner-only writes
//! - `POST /api/properties/search` - Free-text and attribute search
//! - `POST /api/properties/map` - Listings inside a map viewport
//! - `GET /api/countries`, `GET /api/cities` - Reference data

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ListingsAppState;
pub use routes::listings_router;
