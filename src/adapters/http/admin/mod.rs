//! HTTP adapter for the administrator dashboard.
//!
//! - `GET /api/admin/stats` - Aggregate counters and charts
//! - `GET /api/admin/kpis` - Daily signups and new listings, last 30 days
//! - `GET /api/admin/metrics` - In-process request metrics
//! - `GET /api/admin/reports?status=` - Review reports
//! - `PATCH /api/admin/reports/:id` - Moderate a report
//!
//! Every route requires an administrator.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AdminAppState;
pub use routes::admin_router;
