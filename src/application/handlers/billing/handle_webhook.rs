//! HandleWebhookHandler - Command handler for Stripe webhook events.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::account::{BillingUpdate, User};
use crate::domain::billing::{classify, BillingAction, PlanPrices, WebhookError};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{
    PaymentProvider, SaveResult, UserRepository, WebhookEvent, WebhookEventRecord,
    WebhookEventRepository, WebhookOutcome,
};

/// Command to process a webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleWebhookCommand {
    /// Raw request body, exactly as signed.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value.
    pub signature: String,
}

/// What happened to a verified event.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleWebhookResult {
    /// Already in the ledger; nothing was applied.
    Duplicate,
    /// Credits or plan applied to a user.
    Applied { user_id: UserId },
    /// Recognised but nothing to do.
    Ignored { reason: String },
    /// Could not be applied and will not be retried.
    Failed { reason: String },
}

/// Handler for Stripe webhooks.
///
/// Every verified event is claimed in the idempotency ledger before it is
/// applied, so a redelivery (concurrent or later) is acknowledged without
/// touching balances again. Storage failures release the claim so Stripe
/// retries them.
pub struct HandleWebhookHandler {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentProvider>,
    ledger: Arc<dyn WebhookEventRepository>,
    prices: PlanPrices,
}

impl HandleWebhookHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        payments: Arc<dyn PaymentProvider>,
        ledger: Arc<dyn WebhookEventRepository>,
        prices: PlanPrices,
    ) -> Self {
        Self {
            users,
            payments,
            ledger,
            prices,
        }
    }

    pub async fn handle(&self, cmd: HandleWebhookCommand) -> Result<HandleWebhookResult, DomainError> {
        // 1. Verify signature and parse
        let event = self
            .payments
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook verification failed");
                let err = WebhookError::Verification(e.message);
                DomainError::validation("signature", format!("Webhook Error: {}", err))
            })?;

        // 2. Claim the event id; only the delivery that inserts it applies it
        let payload: Value = serde_json::from_slice(&cmd.payload).unwrap_or(Value::Null);
        let event_type = event.event_type.as_str().to_string();
        let claim = WebhookEventRecord::processing(&event.id, &event_type, payload);
        if self.ledger.save(claim).await? == SaveResult::AlreadyExists {
            let previous = self.ledger.find_by_event_id(&event.id).await?;
            tracing::info!(
                event_id = %event.id,
                event_type = %event_type,
                previous = previous.as_ref().map(|r| r.outcome.as_str()).unwrap_or("unknown"),
                "Duplicate webhook event"
            );
            return Ok(HandleWebhookResult::Duplicate);
        }

        tracing::info!(event_id = %event.id, event_type = %event_type, "Processing webhook event");

        // 3. Apply
        let (result, outcome, error_message) = match self.apply(&event).await {
            Ok(user_id) => (
                HandleWebhookResult::Applied { user_id },
                WebhookOutcome::Success,
                None,
            ),
            Err(WebhookError::Ignored(reason)) => (
                HandleWebhookResult::Ignored {
                    reason: reason.clone(),
                },
                WebhookOutcome::Ignored,
                Some(reason),
            ),
            Err(err) if err.is_retryable() => {
                tracing::error!(event_id = %event.id, error = %err, "Webhook processing failed, leaving for retry");
                self.ledger.release(&event.id).await?;
                return Err(DomainError::database(err.to_string()));
            }
            Err(err) => {
                tracing::warn!(event_id = %event.id, error = %err, "Webhook event could not be applied");
                (
                    HandleWebhookResult::Failed {
                        reason: err.to_string(),
                    },
                    WebhookOutcome::Failed,
                    Some(err.to_string()),
                )
            }
        };

        // 4. Record the outcome
        self.ledger
            .complete(&event.id, outcome, error_message)
            .await?;
        Ok(result)
    }

    async fn apply(&self, event: &WebhookEvent) -> Result<UserId, WebhookError> {
        match classify(event, &self.prices) {
            BillingAction::CreditListings {
                customer_id,
                user_id,
                credits,
            } => {
                let user = self.find_user(customer_id.as_deref(), user_id).await?;
                self.users.add_listing_credits(user.id, credits).await?;
                tracing::info!(user_id = %user.id, credits, "Listing credits added");
                Ok(user.id)
            }
            BillingAction::ActivatePlan {
                customer_id,
                subscription_id,
                plan,
            } => {
                let user = self.find_user(Some(&customer_id), None).await?;
                let update = BillingUpdate {
                    stripe_subscription_id: Some(subscription_id),
                    subscription_plan: Some(plan),
                    subscription_expires_at: Some(Timestamp::now().add_months(1)),
                    remaining_listings: Some(plan.listing_limit()),
                    ..BillingUpdate::default()
                };
                self.users.update_billing(user.id, &update).await?;
                tracing::info!(user_id = %user.id, plan = %plan, "Subscription plan activated");
                Ok(user.id)
            }
            BillingAction::Ignore(reason) => Err(WebhookError::Ignored(reason)),
        }
    }

    /// Finds the paying user by Stripe customer, then by the `userId` metadata.
    async fn find_user(
        &self,
        customer_id: Option<&str>,
        user_id: Option<UserId>,
    ) -> Result<User, WebhookError> {
        if let Some(customer_id) = customer_id {
            if let Some(user) = self.users.find_by_stripe_customer_id(customer_id).await? {
                return Ok(user);
            }
        }
        if let Some(user_id) = user_id {
            if let Some(user) = self.users.find_by_id(user_id).await? {
                return Ok(user);
            }
        }
        Err(WebhookError::UserNotFound(
            customer_id
                .map(str::to_string)
                .or_else(|| user_id.map(|id| id.to_string()))
                .unwrap_or_else(|| "unknown".to_string()),
        ))
    }
}
