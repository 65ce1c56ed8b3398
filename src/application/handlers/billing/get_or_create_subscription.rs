//! GetOrCreateSubscriptionHandler - Command handler for recurring plans.

use std::sync::Arc;

use crate::domain::account::{BillingUpdate, User};
use crate::domain::billing::PlanPrices;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{
    CreateCustomerRequest, CreateSubscriptionRequest, PaymentProvider, UserRepository,
};

#[derive(Debug, Clone)]
pub struct GetOrCreateSubscriptionCommand {
    pub user_id: UserId,
    pub plan: String,
}

#[derive(Debug, Clone)]
pub struct GetOrCreateSubscriptionResult {
    pub subscription_id: String,
    /// Secret of the first invoice's payment intent, for client confirmation.
    pub client_secret: Option<String>,
    /// False when an existing subscription was returned.
    pub created: bool,
}

/// Handler for subscription get-or-create.
///
/// A user with a retrievable subscription gets it back unchanged. Otherwise a
/// Stripe customer is ensured and a `default_incomplete` subscription is
/// created for the plan's price.
pub struct GetOrCreateSubscriptionHandler {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentProvider>,
    prices: PlanPrices,
}

impl GetOrCreateSubscriptionHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        payments: Arc<dyn PaymentProvider>,
        prices: PlanPrices,
    ) -> Self {
        Self {
            users,
            payments,
            prices,
        }
    }

    pub async fn handle(
        &self,
        cmd: GetOrCreateSubscriptionCommand,
    ) -> Result<GetOrCreateSubscriptionResult, DomainError> {
        let user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::unauthorized("Utente non trovato"))?;

        // 1. Existing subscription wins
        if let Some(existing) = self.existing(&user).await {
            return Ok(existing);
        }

        // 2. Resolve the plan's price
        let (plan, price_id) = self
            .prices
            .price_for(&cmd.plan)
            .ok_or_else(|| DomainError::validation("plan", "Piano non valido"))?;

        // 3. Ensure a customer
        let customer_id = self.ensure_customer(&user).await?;

        // 4. Create the subscription
        let subscription = self
            .payments
            .create_subscription(CreateSubscriptionRequest {
                customer_id,
                price_id: price_id.to_string(),
                idempotency_key: None,
            })
            .await?;

        // 5. Remember it
        self.users
            .update_billing(
                user.id,
                &BillingUpdate {
                    stripe_subscription_id: Some(subscription.id.clone()),
                    ..BillingUpdate::default()
                },
            )
            .await?;

        tracing::info!(
            user_id = %user.id,
            subscription_id = %subscription.id,
            plan = %plan,
            "Subscription created"
        );

        Ok(GetOrCreateSubscriptionResult {
            subscription_id: subscription.id,
            client_secret: subscription.client_secret,
            created: true,
        })
    }

    async fn existing(&self, user: &User) -> Option<GetOrCreateSubscriptionResult> {
        let subscription_id = user.stripe_subscription_id.as_deref()?;
        match self.payments.get_subscription(subscription_id).await {
            Ok(Some(subscription)) => Some(GetOrCreateSubscriptionResult {
                subscription_id: subscription.id,
                client_secret: subscription.client_secret,
                created: false,
            }),
            Ok(None) => {
                tracing::warn!(user_id = %user.id, subscription_id, "Stored subscription not found");
                None
            }
            Err(e) => {
                tracing::warn!(user_id = %user.id, subscription_id, error = %e, "Subscription lookup failed");
                None
            }
        }
    }

    async fn ensure_customer(&self, user: &User) -> Result<String, DomainError> {
        if let Some(customer_id) = &user.stripe_customer_id {
            return Ok(customer_id.clone());
        }

        let customer = self
            .payments
            .create_customer(CreateCustomerRequest {
                user_id: user.id,
                email: user.email.clone(),
                name: Some(user.username.clone()),
                idempotency_key: Some(format!("customer-{}", user.id)),
            })
            .await?;

        self.users
            .update_billing(
                user.id,
                &BillingUpdate {
                    stripe_customer_id: Some(customer.id.clone()),
                    ..BillingUpdate::default()
                },
            )
            .await?;

        tracing::info!(user_id = %user.id, customer_id = %customer.id, "Stripe customer created");
        Ok(customer.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::account::user::test_user;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::{PaymentError, Subscription, SubscriptionStatus};

    async fn setup(user: User) -> (Arc<InMemoryStore>, MockPaymentProvider, GetOrCreateSubscriptionHandler) {
        let store = Arc::new(InMemoryStore::new());
        store.insert_user(user).await;
        let payments = MockPaymentProvider::new();
        let handler = GetOrCreateSubscriptionHandler::new(
            store.clone(),
            Arc::new(payments.clone()),
            PlanPrices::default(),
        );
        (store, payments, handler)
    }

    fn command(plan: &str) -> GetOrCreateSubscriptionCommand {
        GetOrCreateSubscriptionCommand {
            user_id: UserId::from_raw(1),
            plan: plan.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_customer_and_subscription_for_new_subscriber() {
        let (store, payments, handler) = setup(test_user(1)).await;

        let result = handler.handle(command("premium")).await.unwrap();
        assert!(result.created);
        assert!(result.client_secret.is_some());
        assert_eq!(payments.call_count("create_customer"), 1);

        let sub_call = payments
            .calls()
            .into_iter()
            .find(|c| c.method == "create_subscription")
            .unwrap();
        assert_eq!(sub_call.args[1], "price_premium");

        let user = store.find_by_id(UserId::from_raw(1)).await.unwrap().unwrap();
        assert!(user.stripe_customer_id.is_some());
        assert_eq!(user.stripe_subscription_id.as_deref(), Some(result.subscription_id.as_str()));
    }

    #[tokio::test]
    async fn existing_subscription_is_returned_without_creation() {
        let mut user = test_user(1);
        user.stripe_customer_id = Some("cus_1".to_string());
        user.stripe_subscription_id = Some("sub_1".to_string());
        let (_, payments, handler) = setup(user).await;
        payments.add_subscription(Subscription {
            id: "sub_1".to_string(),
            customer_id: "cus_1".to_string(),
            status: SubscriptionStatus::Active,
            price_id: Some("price_standard".to_string()),
            current_period_end: None,
            cancel_at_period_end: false,
            client_secret: Some("pi_secret".to_string()),
        });

        let result = handler.handle(command("standard")).await.unwrap();
        assert!(!result.created);
        assert_eq!(result.subscription_id, "sub_1");
        assert_eq!(result.client_secret.as_deref(), Some("pi_secret"));
        assert!(!payments.was_called("create_customer"));
        assert!(!payments.was_called("create_subscription"));
    }

    #[tokio::test]
    async fn failed_lookup_falls_through_to_creation_with_existing_customer() {
        let mut user = test_user(1);
        user.stripe_customer_id = Some("cus_1".to_string());
        user.stripe_subscription_id = Some("sub_gone".to_string());
        let (_, payments, handler) = setup(user).await;
        payments.set_method_error("get_subscription", PaymentError::network("timeout"));

        let result = handler.handle(command("standard")).await.unwrap();
        assert!(result.created);
        assert!(!payments.was_called("create_customer"));
        assert_eq!(payments.call_count("create_subscription"), 1);
    }

    #[tokio::test]
    async fn unknown_plan_is_rejected() {
        let (_, payments, handler) = setup(test_user(1)).await;
        let err = handler.handle(command("gold")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Piano non valido");
        assert!(!payments.was_called("create_subscription"));
    }
}
