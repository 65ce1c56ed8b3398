//! Review repository port.
//!
//! Covers reviews, their moderation reports and helpfulness votes.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PropertyId, ReportId, ReviewId, Timestamp, UserId};
use crate::domain::review::{NewReport, NewReview, ReportStatus, Review, ReviewReport, VoteChange};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError>;

    /// Reviews of a listing, newest first.
    async fn for_property(&self, property_id: PropertyId) -> Result<Vec<Review>, DomainError>;

    async fn find_by_author(
        &self,
        property_id: PropertyId,
        user_id: UserId,
    ) -> Result<Option<Review>, DomainError>;

    async fn create(
        &self,
        author: UserId,
        review: NewReview,
        now: Timestamp,
    ) -> Result<Review, DomainError>;

    /// Saves rating, comment, owner response and counters.
    async fn update(&self, review: &Review) -> Result<(), DomainError>;

    /// Removes the review with its votes and reports.
    async fn delete(&self, id: ReviewId) -> Result<bool, DomainError>;

    async fn find_report_by(
        &self,
        review_id: ReviewId,
        user_id: UserId,
    ) -> Result<Option<ReviewReport>, DomainError>;

    async fn create_report(
        &self,
        review_id: ReviewId,
        reporter: UserId,
        report: NewReport,
        now: Timestamp,
    ) -> Result<ReviewReport, DomainError>;

    async fn find_report(&self, id: ReportId) -> Result<Option<ReviewReport>, DomainError>;

    /// Reports, newest first, optionally with one status.
    async fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<ReviewReport>, DomainError>;

    async fn update_report(&self, report: &ReviewReport) -> Result<(), DomainError>;

    /// Casts, switches or repeats `voter`'s vote and moves the review
    /// counters by the matching deltas in one atomic step. Concurrent votes
    /// on the same review must not lose updates. Returns the review as
    /// stored afterwards, or `None` when it does not exist.
    async fn cast_vote(
        &self,
        review_id: ReviewId,
        voter: UserId,
        is_helpful: bool,
        now: Timestamp,
    ) -> Result<Option<(Review, VoteChange)>, DomainError>;
}
