//! Translation of payment webhook events into account changes.

use thiserror::Error;

use crate::domain::account::SubscriptionPlan;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{WebhookEvent, WebhookEventData, WebhookEventType};

use super::{PlanPrices, FIVE_LISTINGS_CREDITS, FIVE_LISTINGS_PLAN};

/// What a webhook event means for the owning account.
#[derive(Debug, Clone, PartialEq)]
pub enum BillingAction {
    /// Add prepaid listing credits.
    CreditListings {
        customer_id: Option<String>,
        user_id: Option<UserId>,
        credits: i32,
    },

    /// Switch the account to a plan for one more period.
    ActivatePlan {
        customer_id: String,
        subscription_id: String,
        plan: SubscriptionPlan,
    },

    /// Nothing to do; the reason is stored in the webhook ledger.
    Ignore(String),
}

/// Decides what an event should do to the account that owns it.
pub fn classify(event: &WebhookEvent, prices: &PlanPrices) -> BillingAction {
    match (&event.event_type, &event.data) {
        (
            WebhookEventType::PaymentIntentSucceeded,
            WebhookEventData::PaymentIntent {
                customer_id,
                metadata,
                ..
            },
        ) => {
            let is_package = metadata.get("plan").map(String::as_str) == Some(FIVE_LISTINGS_PLAN)
                || metadata.get("listingPackage").map(String::as_str) == Some("5");
            if !is_package {
                return BillingAction::Ignore("payment intent is not a listing package".into());
            }
            BillingAction::CreditListings {
                customer_id: customer_id.clone(),
                user_id: metadata.get("userId").and_then(|s| s.parse().ok()),
                credits: FIVE_LISTINGS_CREDITS,
            }
        }
        (
            WebhookEventType::SubscriptionCreated | WebhookEventType::SubscriptionUpdated,
            WebhookEventData::Subscription {
                subscription_id,
                customer_id,
                price_id,
                ..
            },
        ) => BillingAction::ActivatePlan {
            customer_id: customer_id.clone(),
            subscription_id: subscription_id.clone(),
            plan: prices.plan_for_price(price_id.as_deref()),
        },
        (event_type, _) => {
            BillingAction::Ignore(format!("No handler for event type: {}", event_type.as_str()))
        }
    }
}

/// Errors that occur while applying a webhook event.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature or payload rejected by the provider adapter.
    #[error("{0}")]
    Verification(String),

    /// No account is linked to the event's customer.
    #[error("No user found for customer {0}")]
    UserNotFound(String),

    /// Event was intentionally ignored (not an error condition).
    #[error("Event ignored: {0}")]
    Ignored(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Returns true if the provider should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Database(_))
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Database(err.to_string())
    }
}
