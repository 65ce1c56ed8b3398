//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port: customers, payment intents for
//! one-off listing purchases, subscriptions and webhook verification.
//!
//! Webhook signatures are HMAC-SHA256 with constant-time comparison and a
//! 5-minute replay window.

mod mock_payment_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use stripe_adapter::{sign_payload, StripeConfig, StripePaymentAdapter};
pub use webhook_types::{SignatureHeader, SignatureParseError, StripeWebhookEvent};
