//! HTTP adapter for rent pricing endpoints.
//!
//! - `POST /api/admin/calculate-price-stats` - Rebuild statistics (admin)
//! - `GET /api/pricing-suggestion` - Suggested range for city, zone and type

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PricingAppState;
pub use routes::pricing_router;
