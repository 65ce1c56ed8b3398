//! PostgreSQL implementations of AnalyticsReader and WebhookEventRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::domain::admin::{
    AdminStats, CityCount, Kpis, MonthlyCount, PlanCount, TypeCount, KPI_WINDOW_DAYS, TOP_CITIES,
};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ml::UserActivity;
use crate::ports::{
    AnalyticsReader, SaveResult, WebhookEventRecord, WebhookEventRepository, WebhookOutcome,
};

use super::{db_error, ts};

// ════════════════════════════════════════════════════════════════════════════════
// Analytics
// ════════════════════════════════════════════════════════════════════════════════

/// Aggregates computed in SQL so the dashboard never loads whole tables.
pub struct PostgresAnalyticsReader {
    pool: PgPool,
}

impl PostgresAnalyticsReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn created_since(&self, table: &str, since: Timestamp) -> Result<Vec<Timestamp>, DomainError> {
        let sql = format!("SELECT created_at FROM {} WHERE created_at >= $1", table);
        let rows: Vec<(DateTime<Utc>,)> = sqlx::query_as(&sql)
            .bind(since.as_datetime())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("load KPI series"))?;
        Ok(rows.into_iter().map(|(at,)| ts(at)).collect())
    }
}

#[async_trait]
impl AnalyticsReader for PostgresAnalyticsReader {
    async fn admin_stats(&self) -> Result<AdminStats, DomainError> {
        let (total_users, total_properties, total_reviews, avg_rating): (i64, i64, i64, Option<f64>) =
            sqlx::query_as(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM users),
                    (SELECT COUNT(*) FROM properties),
                    (SELECT COUNT(*) FROM reviews),
                    (SELECT AVG(rating)::float8 FROM reviews)
                "#,
            )
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("load totals"))?;

        let monthly: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM') AS month, COUNT(*)
            FROM users GROUP BY month ORDER BY month
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load monthly signups"))?;

        let cities: Vec<(String, i64)> = sqlx::query_as(
            "SELECT city, COUNT(*) AS n FROM properties GROUP BY city ORDER BY n DESC, city LIMIT $1",
        )
        .bind(TOP_CITIES as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load top cities"))?;

        let plans: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT subscription_plan, COUNT(*) FROM users
            WHERE subscription_plan IS NOT NULL
            GROUP BY subscription_plan ORDER BY subscription_plan
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load plan sales"))?;

        let types: Vec<(String, i64)> =
            sqlx::query_as("SELECT type, COUNT(*) FROM properties GROUP BY type ORDER BY type")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("load listing types"))?;

        Ok(AdminStats {
            total_properties,
            total_users,
            total_reviews,
            avg_rating,
            monthly_signups: monthly
                .into_iter()
                .map(|(month, count)| MonthlyCount { month, count })
                .collect(),
            top_cities: cities
                .into_iter()
                .map(|(city, count)| CityCount { city, count })
                .collect(),
            plan_sales: plans
                .into_iter()
                .map(|(plan, count)| PlanCount { plan, count })
                .collect(),
            properties_by_type: types
                .into_iter()
                .map(|(property_type, count)| TypeCount {
                    property_type,
                    count,
                })
                .collect(),
        })
    }

    async fn kpis(&self, now: Timestamp) -> Result<Kpis, DomainError> {
        let since = now.minus_days(KPI_WINDOW_DAYS);
        let signups = self.created_since("users", since).await?;
        let announcements = self.created_since("properties", since).await?;
        Ok(Kpis::compute(signups, announcements, now))
    }

    async fn user_activity(&self, user_id: UserId) -> Result<UserActivity, DomainError> {
        let (listings, avg_listing_price, messages_sent, reviews_written): (i64, f64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM properties WHERE user_id = $1),
                    (SELECT COALESCE(AVG(price), 0)::float8 FROM properties WHERE user_id = $1),
                    (SELECT COUNT(*) FROM messages WHERE sender_id = $1),
                    (SELECT COUNT(*) FROM reviews WHERE user_id = $1)
                "#,
            )
            .bind(user_id.as_i32())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("load user activity"))?;

        Ok(UserActivity {
            listings,
            avg_listing_price,
            messages_sent,
            reviews_written,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook ledger
// ════════════════════════════════════════════════════════════════════════════════

pub struct PostgresWebhookEventRepository {
    pool: PgPool,
}

impl PostgresWebhookEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WebhookEventRow {
    event_id: String,
    event_type: String,
    processed_at: DateTime<Utc>,
    result: String,
    error_message: Option<String>,
    payload: Value,
}

impl From<WebhookEventRow> for WebhookEventRecord {
    fn from(row: WebhookEventRow) -> Self {
        WebhookEventRecord {
            event_id: row.event_id,
            event_type: row.event_type,
            processed_at: ts(row.processed_at),
            outcome: WebhookOutcome::parse(&row.result),
            error_message: row.error_message,
            payload: row.payload,
        }
    }
}

#[async_trait]
impl WebhookEventRepository for PostgresWebhookEventRepository {
    async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<WebhookEventRecord>, DomainError> {
        let row: Option<WebhookEventRow> = sqlx::query_as(
            r#"
            SELECT event_id, event_type, processed_at, result, error_message, payload
            FROM stripe_webhook_events WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find webhook event"))?;
        Ok(row.map(WebhookEventRecord::from))
    }

    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO stripe_webhook_events
                (event_id, event_type, processed_at, result, error_message, payload)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (event_id) DO NOTHING
            "#,
        )
        .bind(&record.event_id)
        .bind(&record.event_type)
        .bind(record.processed_at.as_datetime())
        .bind(record.outcome.as_str())
        .bind(&record.error_message)
        .bind(&record.payload)
        .execute(&self.pool)
        .await
        .map_err(db_error("save webhook event"))?;

        if result.rows_affected() == 0 {
            Ok(SaveResult::AlreadyExists)
        } else {
            Ok(SaveResult::Inserted)
        }
    }

    async fn complete(
        &self,
        event_id: &str,
        outcome: WebhookOutcome,
        error_message: Option<String>,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE stripe_webhook_events
            SET result = $2, error_message = $3, processed_at = NOW()
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .bind(outcome.as_str())
        .bind(error_message)
        .execute(&self.pool)
        .await
        .map_err(db_error("complete webhook event"))?;
        Ok(())
    }

    async fn release(&self, event_id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM stripe_webhook_events WHERE event_id = $1 AND result = 'processing'")
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("release webhook event"))?;
        Ok(())
    }

    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM stripe_webhook_events WHERE processed_at < $1")
            .bind(cutoff.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(db_error("prune webhook events"))?;
        Ok(result.rows_affected())
    }
}
