//! GetPublishingRightsHandler - Query handler for whether a user may publish.

use std::sync::Arc;

use crate::domain::account::PublishingRights;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetPublishingRightsQuery {
    pub user_id: UserId,
}

pub struct GetPublishingRightsHandler {
    users: Arc<dyn UserRepository>,
}

impl GetPublishingRightsHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        query: GetPublishingRightsQuery,
    ) -> Result<PublishingRights, DomainError> {
        let user = self
            .users
            .find_by_id(query.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Utente non trovato"))?;
        Ok(PublishingRights::for_user(&user, Timestamp::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::account::user::test_user;
    use crate::domain::account::SubscriptionPlan;

    async fn rights_for(user: crate::domain::account::User) -> PublishingRights {
        let store = Arc::new(InMemoryStore::new());
        let id = user.id;
        store.insert_user(user).await;
        GetPublishingRightsHandler::new(store)
            .handle(GetPublishingRightsQuery { user_id: id })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn fresh_account_publishes_with_free_listing() {
        let rights = rights_for(test_user(1)).await;
        assert!(rights.can_publish);
        assert!(rights.has_free_listing);
        assert!(!rights.has_active_subscription);
    }

    #[tokio::test]
    async fn expired_plan_without_credits_cannot_publish() {
        let mut user = test_user(1);
        user.used_free_listing = true;
        user.subscription_plan = Some(SubscriptionPlan::Standard);
        user.subscription_expires_at = Some(Timestamp::now().minus_days(1));

        let rights = rights_for(user).await;
        assert!(!rights.can_publish);
        assert!(!rights.has_active_subscription);
        assert_eq!(rights.subscription_plan, Some(SubscriptionPlan::Standard));
    }

    #[tokio::test]
    async fn active_plan_grants_publishing() {
        let mut user = test_user(1);
        user.used_free_listing = true;
        user.subscription_plan = Some(SubscriptionPlan::Premium);
        user.subscription_expires_at = Some(Timestamp::now().add_days(10));

        let rights = rights_for(user).await;
        assert!(rights.can_publish);
        assert!(rights.has_active_subscription);
    }
}
