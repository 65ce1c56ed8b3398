//! HTTP handlers for billing endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::billing::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CreatePaymentIntentCommand,
    CreatePaymentIntentHandler, GetOrCreateSubscriptionCommand, GetOrCreateSubscriptionHandler,
    HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult,
};
use crate::domain::billing::PlanPrices;
use crate::ports::{PaymentProvider, UserRepository, WebhookEventRepository};

use super::dto::{
    ClientSecretResponse, CreatePaymentIntentRequest, StatusResponse, SubscriptionRequest,
    SubscriptionResponse, WebhookAck,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct BillingAppState {
    pub users: Arc<dyn UserRepository>,
    pub payments: Arc<dyn PaymentProvider>,
    pub webhook_events: Arc<dyn WebhookEventRepository>,
    pub prices: PlanPrices,
}

impl BillingAppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        payments: Arc<dyn PaymentProvider>,
        webhook_events: Arc<dyn WebhookEventRepository>,
        prices: PlanPrices,
    ) -> Self {
        Self {
            users,
            payments,
            webhook_events,
            prices,
        }
    }

    pub fn payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(self.users.clone(), self.payments.clone())
    }

    pub fn subscription_handler(&self) -> GetOrCreateSubscriptionHandler {
        GetOrCreateSubscriptionHandler::new(
            self.users.clone(),
            self.payments.clone(),
            self.prices.clone(),
        )
    }

    pub fn cancel_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.users.clone(), self.payments.clone())
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        HandleWebhookHandler::new(
            self.users.clone(),
            self.payments.clone(),
            self.webhook_events.clone(),
            self.prices.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Payments
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/create-payment-intent
pub async fn create_payment_intent(
    State(state): State<BillingAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreatePaymentIntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .payment_intent_handler()
        .handle(CreatePaymentIntentCommand {
            user_id: user.id,
            amount: req.amount,
            plan: req.plan,
            property_id: req.property_id,
        })
        .await?;

    Ok(Json(ClientSecretResponse {
        client_secret: result.client_secret,
    }))
}

/// POST /api/get-or-create-subscription
pub async fn get_or_create_subscription(
    State(state): State<BillingAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SubscriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .subscription_handler()
        .handle(GetOrCreateSubscriptionCommand {
            user_id: user.id,
            plan: req.plan,
        })
        .await?;

    Ok(Json(SubscriptionResponse {
        subscription_id: result.subscription_id,
        client_secret: result.client_secret,
    }))
}

/// POST /api/cancel-subscription
pub async fn cancel_subscription(
    State(state): State<BillingAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .cancel_handler()
        .handle(CancelSubscriptionCommand { user_id: user.id })
        .await?;
    Ok(Json(StatusResponse { status: "success" }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhooks
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/webhook and POST /api/stripe-webhook
///
/// Every verified event is acknowledged, including ones that failed to
/// apply; those are kept in the ledger for inspection.
pub async fn stripe_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("Webhook Error: missing Stripe-Signature header"))?;

    let result = state
        .webhook_handler()
        .handle(HandleWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
        })
        .await?;

    if let HandleWebhookResult::Failed { reason } = &result {
        tracing::warn!(reason = %reason, "Webhook event recorded as failed");
    }

    Ok(Json(WebhookAck { received: true }))
}
