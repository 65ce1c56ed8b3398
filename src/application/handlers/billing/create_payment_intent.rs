//! CreatePaymentIntentHandler - Command handler for one-off payments.

use std::sync::Arc;

use crate::domain::billing::resolve_charge;
use crate::domain::foundation::{DomainError, PropertyId, UserId};
use crate::ports::{CreatePaymentIntentRequest, PaymentProvider, UserRepository};

/// Command to start a one-off payment.
///
/// A known `plan` fixes the amount; otherwise `amount` (euros) is charged.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub user_id: UserId,
    pub amount: Option<f64>,
    pub plan: Option<String>,
    pub property_id: Option<PropertyId>,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentIntentResult {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount_cents: i64,
}

pub struct CreatePaymentIntentHandler {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentProvider>,
}

impl CreatePaymentIntentHandler {
    pub fn new(users: Arc<dyn UserRepository>, payments: Arc<dyn PaymentProvider>) -> Self {
        Self { users, payments }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, DomainError> {
        // 1. Resolve amount and metadata
        let charge = resolve_charge(cmd.user_id, cmd.amount, cmd.plan.as_deref(), cmd.property_id)?;

        // 2. Attach the Stripe customer when we already have one
        let customer_id = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .and_then(|user| user.stripe_customer_id);

        // 3. Create the intent
        let intent = self
            .payments
            .create_payment_intent(CreatePaymentIntentRequest {
                amount_cents: charge.amount_cents,
                currency: charge.currency.to_string(),
                metadata: charge.metadata,
                customer_id,
                idempotency_key: None,
            })
            .await
            .map_err(|e| {
                tracing::error!(user_id = %cmd.user_id, error = %e, "Payment intent creation failed");
                DomainError::from(e)
            })?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| DomainError::internal("Payment intent has no client secret"))?;

        tracing::info!(
            user_id = %cmd.user_id,
            payment_intent_id = %intent.id,
            amount_cents = intent.amount_cents,
            "Payment intent created"
        );

        Ok(CreatePaymentIntentResult {
            payment_intent_id: intent.id,
            client_secret,
            amount_cents: intent.amount_cents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::account::user::test_user;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::PaymentError;

    async fn setup() -> (MockPaymentProvider, CreatePaymentIntentHandler) {
        let store = Arc::new(InMemoryStore::new());
        store.insert_user(test_user(1)).await;
        let payments = MockPaymentProvider::new();
        let handler = CreatePaymentIntentHandler::new(store, Arc::new(payments.clone()));
        (payments, handler)
    }

    fn command(amount: Option<f64>, plan: Option<&str>) -> CreatePaymentIntentCommand {
        CreatePaymentIntentCommand {
            user_id: UserId::from_raw(1),
            amount,
            plan: plan.map(str::to_string),
            property_id: None,
        }
    }

    #[tokio::test]
    async fn free_amount_is_charged_in_cents() {
        let (payments, handler) = setup().await;
        let result = handler.handle(command(Some(12.5), None)).await.unwrap();

        assert_eq!(result.amount_cents, 1250);
        assert!(!result.client_secret.is_empty());

        let call = &payments.calls()[0];
        assert_eq!(call.method, "create_payment_intent");
        assert_eq!(call.args[0], "1250");
        assert_eq!(call.args[1], "eur");
        assert!(call.args.contains(&"userId=1".to_string()));
    }

    #[tokio::test]
    async fn listing_package_has_fixed_price_and_metadata() {
        let (payments, handler) = setup().await;
        let result = handler.handle(command(Some(50.0), Some("5listings"))).await.unwrap();

        assert_eq!(result.amount_cents, 99);
        let args = &payments.calls()[0].args;
        assert!(args.contains(&"plan=5listings".to_string()));
        assert!(args.contains(&"listingPackage=5".to_string()));
    }

    #[tokio::test]
    async fn missing_amount_without_plan_never_reaches_stripe() {
        let (payments, handler) = setup().await;
        let err = handler.handle(command(None, None)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(!payments.was_called("create_payment_intent"));
    }

    #[tokio::test]
    async fn provider_failure_is_external_service_error() {
        let (payments, handler) = setup().await;
        payments.set_error(PaymentError::provider("boom"));

        let err = handler.handle(command(Some(10.0), None)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalService);
    }
}
