//! ReportReviewHandler - Command handler for flagging a review to moderators.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ReviewId, Timestamp, UserId};
use crate::domain::review::{NewReport, ReviewReport};
use crate::ports::ReviewRepository;

use super::require_review;

#[derive(Debug, Clone)]
pub struct ReportReviewCommand {
    pub user_id: UserId,
    pub review_id: ReviewId,
    pub report: NewReport,
}

/// Files a `pending` report. Authors cannot report their own reviews and
/// each user reports a review at most once.
pub struct ReportReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReportReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, cmd: ReportReviewCommand) -> Result<ReviewReport, DomainError> {
        cmd.report.validate()?;

        let review = require_review(self.reviews.as_ref(), cmd.review_id).await?;
        if review.is_authored_by(cmd.user_id) {
            return Err(DomainError::validation(
                "reviewId",
                "Non puoi segnalare le tue recensioni",
            ));
        }
        if self
            .reviews
            .find_report_by(review.id, cmd.user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::validation(
                "reviewId",
                "Hai già segnalato questa recensione",
            ));
        }

        let report = self
            .reviews
            .create_report(review.id, cmd.user_id, cmd.report, Timestamp::now())
            .await?;
        tracing::info!(report_id = %report.id, review_id = %review.id, "Review reported");
        Ok(report)
    }
}
