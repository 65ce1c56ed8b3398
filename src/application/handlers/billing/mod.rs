//! Billing handlers.
//!
//! ## Commands
//! - One-off payment intents (listing packages, plan payments)
//! - Subscription get-or-create
//! - Cancelling a subscription at period end
//! - Processing Stripe webhooks through the idempotency ledger
//! - Pruning ledger entries past their retention

mod cancel_subscription;
mod create_payment_intent;
mod get_or_create_subscription;
mod handle_webhook;
mod prune_webhook_events;

// Commands
pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use get_or_create_subscription::{
    GetOrCreateSubscriptionCommand, GetOrCreateSubscriptionHandler, GetOrCreateSubscriptionResult,
};
pub use handle_webhook::{HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult};
pub use prune_webhook_events::{PruneWebhookEventsCommand, PruneWebhookEventsHandler};
