//! Admin dashboard handlers. Every handler requires the admin role.
//!
//! ## Commands
//! - Moderating a review report
//!
//! ## Queries
//! - Dashboard aggregates and growth KPIs
//! - Review reports, optionally by status

mod dashboard;
mod reports;

// Commands
pub use reports::{ModerateReportCommand, ModerateReportHandler};

// Queries
pub use dashboard::{GetAdminStatsHandler, GetAdminStatsQuery, GetKpisHandler, GetKpisQuery};
pub use reports::{ListReportsHandler, ListReportsQuery};
