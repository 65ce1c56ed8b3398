//! Analytics reader port (read side).
//!
//! Aggregate queries behind the admin dashboard and the ML feature vectors.
//! Implementations compute them where the data lives.

use async_trait::async_trait;

use crate::domain::admin::{AdminStats, Kpis};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ml::UserActivity;

#[async_trait]
pub trait AnalyticsReader: Send + Sync {
    async fn admin_stats(&self) -> Result<AdminStats, DomainError>;

    /// Daily signups and new listings over the KPI window ending at `now`.
    async fn kpis(&self, now: Timestamp) -> Result<Kpis, DomainError>;

    async fn user_activity(&self, user_id: UserId) -> Result<UserActivity, DomainError>;
}
