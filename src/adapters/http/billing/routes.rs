//! Axum router configuration for billing endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    cancel_subscription, create_payment_intent, get_or_create_subscription, stripe_webhook,
    BillingAppState,
};

/// Create the billing API router.
///
/// # Routes
///
/// ## Authenticated
/// - `POST /api/create-payment-intent`
/// - `POST /api/get-or-create-subscription`
/// - `POST /api/cancel-subscription`
///
/// ## Webhooks (signature verified)
/// - `POST /api/webhook`
/// - `POST /api/stripe-webhook`
pub fn billing_router() -> Router<BillingAppState> {
    Router::new()
        .route("/api/create-payment-intent", post(create_payment_intent))
        .route("/api/get-or-create-subscription", post(get_or_create_subscription))
        .route("/api/cancel-subscription", post(cancel_subscription))
        .route("/api/webhook", post(stripe_webhook))
        .route("/api/stripe-webhook", post(stripe_webhook))
}
