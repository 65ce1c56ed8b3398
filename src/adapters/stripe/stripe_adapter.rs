//! Stripe payment provider adapter.
//!
//! Talks to the Stripe REST API with form-encoded requests and verifies
//! webhook signatures.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay protection
//! - Secrets held in `secrecy::SecretString`

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentErrorCode, PaymentIntent, PaymentProvider, Subscription,
    SubscriptionStatus, WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{
    hex_encode, SignatureHeader, StripeCustomer, StripeErrorBody, StripeInvoice,
    StripePaymentIntent, StripeSubscription, StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events.
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for timestamps in the future.
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// `sk_live_...` or `sk_test_...`
    api_key: SecretString,
    /// `whsec_...`
    webhook_secret: SecretString,
    api_base_url: String,
    /// Reject test-mode events.
    require_livemode: bool,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: DEFAULT_API_BASE.to_string(),
            require_livemode: false,
        }
    }

    /// Point the adapter at a different API host (stripe-mock, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

/// Stripe implementation of [`PaymentProvider`].
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
    }

    /// POSTs a form, attaching `Idempotency-Key` when given.
    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
        idempotency_key: Option<&str>,
        operation: &'static str,
    ) -> Result<T, PaymentError> {
        let mut builder = self.authorized(self.http_client.post(self.url(path))).form(params);
        if let Some(key) = idempotency_key {
            builder = builder.header("Idempotency-Key", key);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;
        Self::read_json(response, operation).await
    }

    /// GETs an object; `None` on 404.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &'static str,
    ) -> Result<Option<T>, PaymentError> {
        let response = self
            .authorized(self.http_client.get(self.url(path)))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_json(response, operation).await.map(Some)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<T, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(operation, status = status.as_u16(), "Stripe request failed");
            return Err(Self::api_error(status, &body));
        }

        response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })
    }

    fn api_error(status: reqwest::StatusCode, body: &str) -> PaymentError {
        let detail = serde_json::from_str::<StripeErrorBody>(body).ok().map(|b| b.error);
        let message = detail
            .as_ref()
            .and_then(|d| d.message.clone())
            .unwrap_or_else(|| format!("Stripe API error ({})", status.as_u16()));

        let code = match status.as_u16() {
            401 => PaymentErrorCode::AuthenticationError,
            402 => PaymentErrorCode::CardDeclined,
            404 => PaymentErrorCode::NotFound,
            429 => PaymentErrorCode::RateLimitExceeded,
            _ if detail.as_ref().and_then(|d| d.error_type.as_deref()) == Some("card_error") => {
                PaymentErrorCode::CardDeclined
            }
            _ => PaymentErrorCode::ProviderError,
        };

        let error = PaymentError::new(code, message);
        match detail.and_then(|d| d.code) {
            Some(provider_code) => error.with_provider_code(provider_code),
            None => error,
        }
    }

    /// Checks the HMAC and the timestamp window.
    fn verify_signature(&self, payload: &[u8], header: &SignatureHeader) -> Result<(), PaymentError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                age_secs = age,
                "Webhook event too old, possible replay"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }
        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(event_timestamp = header.timestamp, "Webhook event from the future");
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        let mut mac = HmacSha256::new_from_slice(self.config.webhook_secret.expose_secret().as_bytes())
            .map_err(|e| PaymentError::invalid_webhook(format!("Invalid signing secret: {}", e)))?;
        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| bool::from(expected.as_slice().ct_eq(candidate.as_slice())));
        if !matched {
            tracing::warn!("Invalid webhook signature");
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }
        Ok(())
    }
}

/// Parses an already-verified event body into the port's event type.
pub(super) fn parse_event(payload: &[u8], require_livemode: bool) -> Result<WebhookEvent, PaymentError> {
    let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse webhook payload");
        PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
    })?;

    if require_livemode && !stripe_event.livemode {
        tracing::warn!(event_id = %stripe_event.id, "Rejected test mode event");
        return Err(PaymentError::invalid_webhook(
            "Test mode events not allowed in production",
        ));
    }

    let event_type = WebhookEventType::parse(&stripe_event.event_type);
    let data = extract_event_data(&event_type, &stripe_event)?;

    Ok(WebhookEvent {
        id: stripe_event.id,
        event_type,
        data,
        created_at: stripe_event.created,
    })
}

fn extract_event_data(
    event_type: &WebhookEventType,
    event: &StripeWebhookEvent,
) -> Result<WebhookEventData, PaymentError> {
    fn object<T: DeserializeOwned>(event: &StripeWebhookEvent, what: &str) -> Result<T, PaymentError> {
        serde_json::from_value(event.data.object.clone())
            .map_err(|e| PaymentError::invalid_webhook(format!("Invalid {}: {}", what, e)))
    }

    match event_type {
        WebhookEventType::PaymentIntentSucceeded => {
            let intent: StripePaymentIntent = object(event, "payment intent")?;
            Ok(WebhookEventData::PaymentIntent {
                payment_intent_id: intent.id,
                customer_id: intent.customer,
                amount_cents: intent.amount,
                metadata: intent.metadata,
            })
        }
        WebhookEventType::SubscriptionCreated
        | WebhookEventType::SubscriptionUpdated
        | WebhookEventType::SubscriptionDeleted => {
            let sub: StripeSubscription = object(event, "subscription")?;
            Ok(WebhookEventData::Subscription {
                price_id: sub.first_price_id(),
                current_period_end: sub.period_end(),
                status: SubscriptionStatus::parse(&sub.status),
                subscription_id: sub.id,
                customer_id: sub.customer,
            })
        }
        WebhookEventType::InvoicePaid | WebhookEventType::InvoicePaymentFailed => {
            let invoice: StripeInvoice = object(event, "invoice")?;
            Ok(WebhookEventData::Invoice {
                invoice_id: invoice.id,
                customer_id: invoice.customer.unwrap_or_default(),
                subscription_id: invoice.subscription,
                amount_paid: invoice.amount_paid,
                currency: invoice.currency,
            })
        }
        WebhookEventType::Unknown(_) => Ok(WebhookEventData::Raw {
            json: event.data.object.to_string(),
        }),
    }
}

fn to_subscription(sub: StripeSubscription) -> Subscription {
    Subscription {
        price_id: sub.first_price_id(),
        current_period_end: sub.period_end(),
        client_secret: sub.client_secret(),
        status: SubscriptionStatus::parse(&sub.status),
        cancel_at_period_end: sub.cancel_at_period_end,
        id: sub.id,
        customer_id: sub.customer,
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        let mut params = vec![
            ("email".to_string(), request.email.clone()),
            ("metadata[user_id]".to_string(), request.user_id.to_string()),
        ];
        if let Some(name) = &request.name {
            params.push(("name".to_string(), name.clone()));
        }

        let customer: StripeCustomer = self
            .post_form(
                "/v1/customers",
                &params,
                request.idempotency_key.as_deref(),
                "create_customer",
            )
            .await?;

        Ok(Customer {
            id: customer.id,
            email: customer.email.unwrap_or(request.email),
            name: customer.name.or(request.name),
            created_at: customer.created,
        })
    }

    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut params = vec![
            ("amount".to_string(), request.amount_cents.to_string()),
            ("currency".to_string(), request.currency.clone()),
            ("automatic_payment_methods[enabled]".to_string(), "true".to_string()),
        ];
        if let Some(customer) = &request.customer_id {
            params.push(("customer".to_string(), customer.clone()));
        }
        params.extend(
            request
                .metadata
                .iter()
                .map(|(k, v)| (format!("metadata[{}]", k), v.clone())),
        );

        let intent: StripePaymentIntent = self
            .post_form(
                "/v1/payment_intents",
                &params,
                request.idempotency_key.as_deref(),
                "create_payment_intent",
            )
            .await?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
            amount_cents: intent.amount,
            currency: intent.currency,
            status: intent.status,
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        let params = vec![
            ("customer".to_string(), request.customer_id.clone()),
            ("items[0][price]".to_string(), request.price_id.clone()),
            ("payment_behavior".to_string(), "default_incomplete".to_string()),
            ("payment_settings[save_default_payment_method]".to_string(), "on_subscription".to_string()),
            ("expand[]".to_string(), "latest_invoice.payment_intent".to_string()),
        ];

        let sub: StripeSubscription = self
            .post_form(
                "/v1/subscriptions",
                &params,
                request.idempotency_key.as_deref(),
                "create_subscription",
            )
            .await?;

        Ok(to_subscription(sub))
    }

    async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Subscription>, PaymentError> {
        let sub: Option<StripeSubscription> = self
            .get_optional(&format!("/v1/subscriptions/{}", subscription_id), "get_subscription")
            .await?;
        Ok(sub.map(to_subscription))
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> Result<Subscription, PaymentError> {
        let path = format!("/v1/subscriptions/{}", subscription_id);

        let sub: StripeSubscription = if at_period_end {
            self.post_form(
                &path,
                &[("cancel_at_period_end".to_string(), "true".to_string())],
                None,
                "cancel_subscription",
            )
            .await?
        } else {
            let response = self
                .authorized(self.http_client.delete(self.url(&path)))
                .send()
                .await
                .map_err(|e| PaymentError::network(e.to_string()))?;
            Self::read_json(response, "cancel_subscription").await?
        };

        tracing::info!(subscription_id, at_period_end, "Subscription cancellation requested");
        Ok(to_subscription(sub))
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Malformed Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;
        self.verify_signature(payload, &header)?;
        parse_event(payload, self.config.require_livemode)
    }
}

/// Builds a `Stripe-Signature` header for `payload`, as Stripe would.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, PaymentError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::invalid_webhook(format!("Invalid signing secret: {}", e)))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(format!(
        "t={},v1={}",
        timestamp,
        hex_encode(&mac.finalize().into_bytes())
    ))
}
