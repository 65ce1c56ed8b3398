//! Axum router configuration for admin endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{kpis, list_reports, metrics, moderate_report, stats, AdminAppState};

/// Create the admin API router.
pub fn admin_router() -> Router<AdminAppState> {
    Router::new()
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/kpis", get(kpis))
        .route("/api/admin/metrics", get(metrics))
        .route("/api/admin/reports", get(list_reports))
        .route("/api/admin/reports/:id", patch(moderate_report))
}
