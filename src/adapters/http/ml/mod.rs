//! HTTP adapter for the ML dashboard endpoints.
//!
//! - `POST /api/ml/cluster` - User segment
//! - `POST /api/ml/churn` - Churn probability
//! - `POST /api/ml/dynamic-pricing` - Suggested price for a listing
//!
//! Responses are the ML service's JSON, unmodified. Upstream failures keep
//! their status and body.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::MlAppState;
pub use routes::ml_router;
