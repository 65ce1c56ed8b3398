//! Admin domain module.
//!
//! Aggregates for the admin dashboard, growth KPIs, report moderation input
//! and the in-process health snapshot.

mod metrics;
mod stats;

pub use metrics::{MetricsSnapshot, ResponseTimes, ServiceStatus, DEGRADED_ERROR_RATE};
pub use stats::{
    daily_counts, AdminStats, CityCount, DailyCount, Kpis, MonthlyCount, PlanCount,
    ReportModeration, TypeCount, KPI_WINDOW_DAYS, TOP_CITIES,
};
