//! HTTP adapter for Stripe billing endpoints.
//!
//! - `POST /api/create-payment-intent` - One-off payment
//! - `POST /api/get-or-create-subscription` - Idempotent subscription setup
//! - `POST /api/cancel-subscription` - Cancel at period end
//! - `POST /api/webhook`, `POST /api/stripe-webhook` - Signed Stripe events
//!
//! Webhooks are not authenticated by session; the `Stripe-Signature` header
//! is verified by the payment provider instead.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BillingAppState;
pub use routes::billing_router;
