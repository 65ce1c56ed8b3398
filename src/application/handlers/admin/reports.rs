//! Review report moderation.

use std::sync::Arc;

use crate::domain::admin::ReportModeration;
use crate::domain::foundation::{AuthenticatedUser, DomainError, ReportId, Timestamp};
use crate::domain::review::{ReportStatus, ReviewReport};
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct ListReportsQuery {
    pub requested_by: AuthenticatedUser,
    pub status: Option<ReportStatus>,
}

pub struct ListReportsHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ListReportsHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, query: ListReportsQuery) -> Result<Vec<ReviewReport>, DomainError> {
        query.requested_by.require_admin()?;
        self.reviews.list_reports(query.status).await
    }
}

#[derive(Debug, Clone)]
pub struct ModerateReportCommand {
    pub requested_by: AuthenticatedUser,
    pub report_id: ReportId,
    pub moderation: ReportModeration,
}

pub struct ModerateReportHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ModerateReportHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, cmd: ModerateReportCommand) -> Result<ReviewReport, DomainError> {
        cmd.requested_by.require_admin()?;

        let mut report = self
            .reviews
            .find_report(cmd.report_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Segnalazione non trovata"))?;

        report.moderate(
            cmd.moderation.status,
            cmd.moderation.moderator_notes,
            Timestamp::now(),
        );
        self.reviews.update_report(&report).await?;

        tracing::info!(
            report_id = %report.id,
            status = report.status.as_str(),
            admin_id = %cmd.requested_by.id,
            "Review report moderated"
        );
        Ok(report)
    }
}
