//! CancelSubscriptionHandler - Command handler for ending a plan.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{PaymentProvider, Subscription, UserRepository};

#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub user_id: UserId,
}

/// Cancels at period end; the plan stays usable until it expires.
pub struct CancelSubscriptionHandler {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentProvider>,
}

impl CancelSubscriptionHandler {
    pub fn new(users: Arc<dyn UserRepository>, payments: Arc<dyn PaymentProvider>) -> Self {
        Self { users, payments }
    }

    pub async fn handle(&self, cmd: CancelSubscriptionCommand) -> Result<Subscription, DomainError> {
        let subscription_id = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .and_then(|user| user.stripe_subscription_id)
            .ok_or_else(|| {
                DomainError::validation("subscription", "Nessun abbonamento attivo da cancellare")
            })?;

        let subscription = self
            .payments
            .cancel_subscription(&subscription_id, true)
            .await?;

        tracing::info!(user_id = %cmd.user_id, subscription_id = %subscription.id, "Subscription cancelled at period end");
        Ok(subscription)
    }
}
