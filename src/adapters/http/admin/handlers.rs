//! HTTP handlers for admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequestMetrics, RequireAuth};
use crate::application::handlers::admin::{
    GetAdminStatsHandler, GetAdminStatsQuery, GetKpisHandler, GetKpisQuery, ListReportsHandler,
    ListReportsQuery, ModerateReportCommand, ModerateReportHandler,
};
use crate::domain::admin::ReportModeration;
use crate::domain::foundation::ReportId;
use crate::ports::{AnalyticsReader, ReviewRepository};

use super::dto::ReportsParams;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AdminAppState {
    pub analytics: Arc<dyn AnalyticsReader>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub metrics: Arc<RequestMetrics>,
}

impl AdminAppState {
    pub fn new(
        analytics: Arc<dyn AnalyticsReader>,
        reviews: Arc<dyn ReviewRepository>,
        metrics: Arc<RequestMetrics>,
    ) -> Self {
        Self {
            analytics,
            reviews,
            metrics,
        }
    }

    pub fn stats_handler(&self) -> GetAdminStatsHandler {
        GetAdminStatsHandler::new(self.analytics.clone())
    }

    pub fn kpis_handler(&self) -> GetKpisHandler {
        GetKpisHandler::new(self.analytics.clone())
    }

    pub fn list_reports_handler(&self) -> ListReportsHandler {
        ListReportsHandler::new(self.reviews.clone())
    }

    pub fn moderate_report_handler(&self) -> ModerateReportHandler {
        ModerateReportHandler::new(self.reviews.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Dashboard
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AdminAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .stats_handler()
        .handle(GetAdminStatsQuery { requested_by: user })
        .await?;
    Ok(Json(stats))
}

/// GET /api/admin/kpis
pub async fn kpis(
    State(state): State<AdminAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let kpis = state
        .kpis_handler()
        .handle(GetKpisQuery { requested_by: user })
        .await?;
    Ok(Json(kpis))
}

/// GET /api/admin/metrics
pub async fn metrics(
    State(state): State<AdminAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    user.require_admin()?;
    Ok(Json(state.metrics.snapshot()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Moderation
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/reports
pub async fn list_reports(
    State(state): State<AdminAppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ReportsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let reports = state
        .list_reports_handler()
        .handle(ListReportsQuery {
            requested_by: user,
            status: params.status()?,
        })
        .await?;
    Ok(Json(reports))
}

/// PATCH /api/admin/reports/:id
pub async fn moderate_report(
    State(state): State<AdminAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(moderation): Json<ReportModeration>,
) -> Result<impl IntoResponse, ApiError> {
    let report_id = id.parse::<ReportId>()?;
    let report = state
        .moderate_report_handler()
        .handle(ModerateReportCommand {
            requested_by: user,
            report_id,
            moderation,
        })
        .await?;
    Ok(Json(report))
}
