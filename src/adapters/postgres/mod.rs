//! PostgreSQL adapters - sqlx implementations of the repository ports.
//!
//! - `PostgresUserRepository` - accounts, billing fields, listing credits
//! - `PostgresPropertyRepository`, `PostgresCityRepository`, `PostgresPriceStatsRepository`
//! - `PostgresMessageRepository`
//! - `PostgresReviewRepository` - reviews, reports, votes
//! - `PostgresDocumentRepository` - documents and signatures
//! - `PostgresEngagementRepository` - favorites, saved searches, interactions
//! - `PostgresAnalyticsReader` - admin aggregates and ML activity
//! - `PostgresWebhookEventRepository` - Stripe idempotency ledger
//!
//! Schema lives in `migrations/`.

mod accounts;
mod analytics;
mod documents;
mod engagement;
mod listings;
mod messaging;
mod reviews;

pub use accounts::PostgresUserRepository;
pub use analytics::{PostgresAnalyticsReader, PostgresWebhookEventRepository};
pub use documents::PostgresDocumentRepository;
pub use engagement::PostgresEngagementRepository;
pub use listings::{PostgresCityRepository, PostgresPriceStatsRepository, PostgresPropertyRepository};
pub use messaging::PostgresMessageRepository;
pub use reviews::PostgresReviewRepository;

use chrono::{DateTime, Utc};

use crate::domain::foundation::{DomainError, Timestamp};

/// Maps a sqlx failure to a `DatabaseError` naming the attempted action.
fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, action, "Database query failed");
        DomainError::database(format!("Failed to {}: {}", action, e))
    }
}

/// True when `err` violates the named unique constraint or index.
fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}

fn ts(dt: DateTime<Utc>) -> Timestamp {
    Timestamp::from_datetime(dt)
}

fn opt_ts(dt: Option<DateTime<Utc>>) -> Option<Timestamp> {
    dt.map(Timestamp::from_datetime)
}

fn opt_dt(ts: Option<Timestamp>) -> Option<DateTime<Utc>> {
    ts.map(|t| *t.as_datetime())
}

fn corrupt(column: &str, value: &str) -> DomainError {
    DomainError::database(format!("Invalid {} value: {}", column, value))
}
