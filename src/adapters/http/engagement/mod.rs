//! HTTP adapter for favorites, saved searches, interactions and
//! recommendations.
//!
//! - `GET|POST /api/favorites`, `DELETE /api/favorites/:id`
//! - `GET|POST /api/saved-searches`, `DELETE /api/saved-searches/:id`
//! - `POST /api/interactions` (alias `/api/user-interactions`)
//! - `GET /api/recommendations` (alias `/api/recommended-properties`)
//! - `GET /api/properties/:id/similar`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::EngagementAppState;
pub use routes::engagement_router;
