//! PostgreSQL implementation of ReviewRepository (reviews, reports, votes).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, PropertyId, ReportId, ReviewId, Timestamp, UserId};
use crate::domain::review::{NewReport, NewReview, ReportStatus, Review, ReviewReport, VoteChange};
use crate::ports::ReviewRepository;

use super::{corrupt, db_error, opt_dt, opt_ts, ts, violates};

const REVIEW_COLUMNS: &str = "id, user_id, property_id, rating, comment, owner_response, \
     helpful_count, unhelpful_count, created_at";

const REPORT_COLUMNS: &str =
    "id, review_id, user_id, reason, details, status, created_at, resolved_at, moderator_notes";

pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    user_id: i32,
    property_id: i32,
    rating: i32,
    comment: Option<String>,
    owner_response: Option<String>,
    helpful_count: i32,
    unhelpful_count: i32,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: ReviewId::from_raw(row.id),
            user_id: UserId::from_raw(row.user_id),
            property_id: PropertyId::from_raw(row.property_id),
            rating: row.rating,
            comment: row.comment,
            owner_response: row.owner_response,
            helpful_count: row.helpful_count,
            unhelpful_count: row.unhelpful_count,
            created_at: ts(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: i32,
    review_id: i32,
    user_id: i32,
    reason: String,
    details: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
    moderator_notes: Option<String>,
}

impl TryFrom<ReportRow> for ReviewReport {
    type Error = DomainError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(ReviewReport {
            id: ReportId::from_raw(row.id),
            review_id: ReviewId::from_raw(row.review_id),
            user_id: UserId::from_raw(row.user_id),
            status: ReportStatus::parse(&row.status).ok_or_else(|| corrupt("status", &row.status))?,
            reason: row.reason,
            details: row.details,
            created_at: ts(row.created_at),
            resolved_at: opt_ts(row.resolved_at),
            moderator_notes: row.moderator_notes,
        })
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        let sql = format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS);
        let row: Option<ReviewRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find review"))?;
        Ok(row.map(Review::from))
    }

    async fn for_property(&self, property_id: PropertyId) -> Result<Vec<Review>, DomainError> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE property_id = $1 ORDER BY created_at DESC, id DESC",
            REVIEW_COLUMNS
        );
        let rows: Vec<ReviewRow> = sqlx::query_as(&sql)
            .bind(property_id.as_i32())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list reviews"))?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn find_by_author(
        &self,
        property_id: PropertyId,
        user_id: UserId,
    ) -> Result<Option<Review>, DomainError> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE property_id = $1 AND user_id = $2 \
             ORDER BY created_at DESC LIMIT 1",
            REVIEW_COLUMNS
        );
        let row: Option<ReviewRow> = sqlx::query_as(&sql)
            .bind(property_id.as_i32())
            .bind(user_id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find user review"))?;
        Ok(row.map(Review::from))
    }

    async fn create(
        &self,
        author: UserId,
        review: NewReview,
        now: Timestamp,
    ) -> Result<Review, DomainError> {
        let sql = format!(
            "INSERT INTO reviews (user_id, property_id, rating, comment, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            REVIEW_COLUMNS
        );
        let row: ReviewRow = sqlx::query_as(&sql)
            .bind(author.as_i32())
            .bind(review.property_id.as_i32())
            .bind(review.rating)
            .bind(&review.comment)
            .bind(now.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("create review"))?;
        Ok(row.into())
    }

    async fn update(&self, review: &Review) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE reviews SET
                rating = $2, comment = $3, owner_response = $4,
                helpful_count = $5, unhelpful_count = $6
            WHERE id = $1
            "#,
        )
        .bind(review.id.as_i32())
        .bind(review.rating)
        .bind(&review.comment)
        .bind(&review.owner_response)
        .bind(review.helpful_count)
        .bind(review.unhelpful_count)
        .execute(&self.pool)
        .await
        .map_err(db_error("update review"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Review not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete review"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_report_by(
        &self,
        review_id: ReviewId,
        user_id: UserId,
    ) -> Result<Option<ReviewReport>, DomainError> {
        let sql = format!(
            "SELECT {} FROM review_reports WHERE review_id = $1 AND user_id = $2",
            REPORT_COLUMNS
        );
        let row: Option<ReportRow> = sqlx::query_as(&sql)
            .bind(review_id.as_i32())
            .bind(user_id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find report"))?;
        row.map(ReviewReport::try_from).transpose()
    }

    async fn create_report(
        &self,
        review_id: ReviewId,
        reporter: UserId,
        report: NewReport,
        now: Timestamp,
    ) -> Result<ReviewReport, DomainError> {
        let sql = format!(
            "INSERT INTO review_reports (review_id, user_id, reason, details, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            REPORT_COLUMNS
        );
        let row: ReportRow = sqlx::query_as(&sql)
            .bind(review_id.as_i32())
            .bind(reporter.as_i32())
            .bind(&report.reason)
            .bind(&report.details)
            .bind(ReportStatus::Pending.as_str())
            .bind(now.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if violates(&e, "review_reports_review_user_key") {
                    return DomainError::conflict("Review already reported");
                }
                db_error("create report")(e)
            })?;
        ReviewReport::try_from(row)
    }

    async fn find_report(&self, id: ReportId) -> Result<Option<ReviewReport>, DomainError> {
        let sql = format!("SELECT {} FROM review_reports WHERE id = $1", REPORT_COLUMNS);
        let row: Option<ReportRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find report"))?;
        row.map(ReviewReport::try_from).transpose()
    }

    async fn list_reports(
        &self,
        status: Option<ReportStatus>,
    ) -> Result<Vec<ReviewReport>, DomainError> {
        let sql = format!(
            "SELECT {} FROM review_reports WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC",
            REPORT_COLUMNS
        );
        let rows: Vec<ReportRow> = sqlx::query_as(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list reports"))?;
        rows.into_iter().map(ReviewReport::try_from).collect()
    }

    async fn update_report(&self, report: &ReviewReport) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE review_reports SET status = $2, resolved_at = $3, moderator_notes = $4 \
             WHERE id = $1",
        )
        .bind(report.id.as_i32())
        .bind(report.status.as_str())
        .bind(opt_dt(report.resolved_at))
        .bind(&report.moderator_notes)
        .execute(&self.pool)
        .await
        .map_err(db_error("update report"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Report not found"));
        }
        Ok(())
    }

    async fn cast_vote(
        &self,
        review_id: ReviewId,
        voter: UserId,
        is_helpful: bool,
        now: Timestamp,
    ) -> Result<Option<(Review, VoteChange)>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        // Row lock serializes votes on one review until commit.
        let locked: Option<(i32,)> = sqlx::query_as("SELECT id FROM reviews WHERE id = $1 FOR UPDATE")
            .bind(review_id.as_i32())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("lock review"))?;
        if locked.is_none() {
            return Ok(None);
        }

        let previous: Option<(bool,)> = sqlx::query_as(
            "SELECT is_helpful FROM review_votes WHERE review_id = $1 AND user_id = $2",
        )
        .bind(review_id.as_i32())
        .bind(voter.as_i32())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("find vote"))?;

        let change = VoteChange::between(previous.map(|(v,)| v), is_helpful);
        let (helpful, unhelpful) = change.deltas(is_helpful);

        if change != VoteChange::Unchanged {
            sqlx::query(
                r#"
                INSERT INTO review_votes (review_id, user_id, is_helpful, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (review_id, user_id) DO UPDATE SET is_helpful = EXCLUDED.is_helpful
                "#,
            )
            .bind(review_id.as_i32())
            .bind(voter.as_i32())
            .bind(is_helpful)
            .bind(now.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(db_error("record vote"))?;
        }

        let sql = format!(
            "UPDATE reviews SET helpful_count = GREATEST(helpful_count + $2, 0), \
             unhelpful_count = GREATEST(unhelpful_count + $3, 0) \
             WHERE id = $1 RETURNING {}",
            REVIEW_COLUMNS
        );
        let row: ReviewRow = sqlx::query_as(&sql)
            .bind(review_id.as_i32())
            .bind(helpful)
            .bind(unhelpful)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("update vote counts"))?;

        tx.commit().await.map_err(db_error("commit vote"))?;
        Ok(Some((Review::from(row), change)))
    }
}
