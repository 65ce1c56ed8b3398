//! Dashboard aggregates and KPI series.

use std::sync::Arc;

use crate::domain::admin::{AdminStats, Kpis};
use crate::domain::foundation::{AuthenticatedUser, DomainError, Timestamp};
use crate::ports::AnalyticsReader;

#[derive(Debug, Clone)]
pub struct GetAdminStatsQuery {
    pub requested_by: AuthenticatedUser,
}

pub struct GetAdminStatsHandler {
    analytics: Arc<dyn AnalyticsReader>,
}

impl GetAdminStatsHandler {
    pub fn new(analytics: Arc<dyn AnalyticsReader>) -> Self {
        Self { analytics }
    }

    pub async fn handle(&self, query: GetAdminStatsQuery) -> Result<AdminStats, DomainError> {
        query.requested_by.require_admin()?;
        self.analytics.admin_stats().await
    }
}

#[derive(Debug, Clone)]
pub struct GetKpisQuery {
    pub requested_by: AuthenticatedUser,
}

/// Daily signups and new listings over the KPI window.
pub struct GetKpisHandler {
    analytics: Arc<dyn AnalyticsReader>,
}

impl GetKpisHandler {
    pub fn new(analytics: Arc<dyn AnalyticsReader>) -> Self {
        Self { analytics }
    }

    pub async fn handle(&self, query: GetKpisQuery) -> Result<Kpis, DomainError> {
        query.requested_by.require_admin()?;
        self.analytics.kpis(Timestamp::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::account::user::test_user;
    use crate::domain::foundation::{ErrorCode, Role, UserId};

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::from_raw(1), "admin", "admin@example.com", Role::Admin)
    }

    #[tokio::test]
    async fn admin_sees_totals() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_user(test_user(1)).await;
        store.insert_user(test_user(2)).await;

        let stats = GetAdminStatsHandler::new(store)
            .handle(GetAdminStatsQuery {
                requested_by: admin(),
            })
            .await
            .unwrap();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_properties, 0);
        assert!(stats.avg_rating.is_none());
    }

    #[tokio::test]
    async fn kpis_cover_signups_of_the_window() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_user(test_user(1)).await;

        let kpis = GetKpisHandler::new(store)
            .handle(GetKpisQuery {
                requested_by: admin(),
            })
            .await
            .unwrap();
        let total: i64 = kpis.signups.iter().map(|d| d.count).sum();
        assert_eq!(total, 1);
        assert!(kpis.announcements.iter().all(|d| d.count == 0));
    }

    #[tokio::test]
    async fn regular_users_are_forbidden() {
        let user = AuthenticatedUser::new(UserId::from_raw(2), "u", "u@example.com", Role::User);
        let err = GetAdminStatsHandler::new(Arc::new(InMemoryStore::new()))
            .handle(GetAdminStatsQuery { requested_by: user })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
