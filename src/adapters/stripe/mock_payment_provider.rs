//! In-process payment provider for tests and local development.
//!
//! Supports:
//! - Generated ids for customers, payment intents and subscriptions
//! - Error injection, per method or for the next call
//! - Call tracking
//! - Webhook payloads parsed without a signature check

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentIntent, PaymentProvider, Subscription, SubscriptionStatus, WebhookEvent,
};

use super::stripe_adapter::parse_event;

/// Mock payment provider. Clones share state.
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
    sequence: Arc<AtomicU64>,
}

#[derive(Default)]
struct MockState {
    customers: HashMap<String, Customer>,
    subscriptions: HashMap<String, Subscription>,
    next_subscription_status: Option<SubscriptionStatus>,
    next_error: Option<PaymentError>,
    method_errors: HashMap<String, PaymentError>,
    call_log: Vec<MethodCall>,
    reject_webhooks: bool,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose webhook verification always fails.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.state().reject_webhooks = true;
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}_mock_{}", prefix, self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration
    // ════════════════════════════════════════════════════════════════════════════

    /// Status given to the next created subscription (default `incomplete`).
    pub fn set_next_subscription_status(&self, status: SubscriptionStatus) {
        self.state().next_subscription_status = Some(status);
    }

    pub fn add_subscription(&self, subscription: Subscription) {
        self.state()
            .subscriptions
            .insert(subscription.id.clone(), subscription);
    }

    /// Fail the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Fail every call to `method` until cleared.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.state();
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }
        match state.next_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        self.record_call(
            "create_customer",
            vec![request.user_id.to_string(), request.email.clone()],
        );
        self.check_error("create_customer")?;

        let customer = Customer {
            id: self.next_id("cus"),
            email: request.email,
            name: request.name,
            created_at: chrono::Utc::now().timestamp(),
        };
        self.state()
            .customers
            .insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }

    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        self.record_call(
            "create_payment_intent",
            std::iter::once(request.amount_cents.to_string())
                .chain(std::iter::once(request.currency.clone()))
                .chain(request.metadata.iter().map(|(k, v)| format!("{}={}", k, v)))
                .collect(),
        );
        self.check_error("create_payment_intent")?;

        let id = self.next_id("pi");
        Ok(PaymentIntent {
            client_secret: Some(format!("{}_secret", id)),
            id,
            amount_cents: request.amount_cents,
            currency: request.currency,
            status: "requires_payment_method".to_string(),
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        self.record_call(
            "create_subscription",
            vec![request.customer_id.clone(), request.price_id.clone()],
        );
        self.check_error("create_subscription")?;

        let id = self.next_id("sub");
        let mut state = self.state();
        let subscription = Subscription {
            client_secret: Some(format!("pi_{}_secret", id)),
            id,
            customer_id: request.customer_id,
            status: state
                .next_subscription_status
                .take()
                .unwrap_or(SubscriptionStatus::Incomplete),
            price_id: Some(request.price_id),
            current_period_end: Some(chrono::Utc::now().timestamp() + 30 * 24 * 60 * 60),
            cancel_at_period_end: false,
        };
        state
            .subscriptions
            .insert(subscription.id.clone(), subscription.clone());
        Ok(subscription)
    }

    async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Subscription>, PaymentError> {
        self.record_call("get_subscription", vec![subscription_id.to_string()]);
        self.check_error("get_subscription")?;
        Ok(self.state().subscriptions.get(subscription_id).cloned())
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> Result<Subscription, PaymentError> {
        self.record_call(
            "cancel_subscription",
            vec![subscription_id.to_string(), at_period_end.to_string()],
        );
        self.check_error("cancel_subscription")?;

        let mut state = self.state();
        let subscription = state
            .subscriptions
            .get_mut(subscription_id)
            .ok_or_else(|| PaymentError::not_found("Subscription"))?;

        subscription.cancel_at_period_end = at_period_end;
        if !at_period_end {
            subscription.status = SubscriptionStatus::Canceled;
        }
        Ok(subscription.clone())
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.record_call("verify_webhook", vec![signature.chars().take(20).collect()]);
        self.check_error("verify_webhook")?;

        if self.state().reject_webhooks {
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }
        parse_event(payload, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::{PaymentErrorCode, WebhookEventData, WebhookEventType};

    fn customer_request() -> CreateCustomerRequest {
        CreateCustomerRequest {
            user_id: UserId::from_raw(1),
            email: "mario@example.com".into(),
            name: Some("Mario".into()),
            idempotency_key: None,
        }
    }

    #[tokio::test]
    async fn generates_distinct_ids() {
        let mock = MockPaymentProvider::new();
        let a = mock.create_customer(customer_request()).await.unwrap();
        let b = mock.create_customer(customer_request()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("cus_mock_"));
        assert_eq!(mock.call_count("create_customer"), 2);
    }

    #[tokio::test]
    async fn subscriptions_start_incomplete_with_client_secret() {
        let mock = MockPaymentProvider::new();
        let sub = mock
            .create_subscription(CreateSubscriptionRequest {
                customer_id: "cus_1".into(),
                price_id: "price_standard".into(),
                idempotency_key: None,
            })
            .await
            .unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Incomplete);
        assert!(sub.client_secret.is_some());
        let fetched = mock.get_subscription(&sub.id).await.unwrap().unwrap();
        assert_eq!(fetched.price_id.as_deref(), Some("price_standard"));
    }

    #[tokio::test]
    async fn cancel_at_period_end_keeps_status() {
        let mock = MockPaymentProvider::new();
        mock.set_next_subscription_status(SubscriptionStatus::Active);
        let sub = mock
            .create_subscription(CreateSubscriptionRequest {
                customer_id: "cus_1".into(),
                price_id: "price_premium".into(),
                idempotency_key: None,
            })
            .await
            .unwrap();

        let canceled = mock.cancel_subscription(&sub.id, true).await.unwrap();
        assert!(canceled.cancel_at_period_end);
        assert_eq!(canceled.status, SubscriptionStatus::Active);

        let missing = mock.cancel_subscription("sub_nope", true).await.unwrap_err();
        assert_eq!(missing.code, PaymentErrorCode::NotFound);
    }

    #[tokio::test]
    async fn injected_errors() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::network("down"));
        assert!(mock.create_customer(customer_request()).await.is_err());
        assert!(mock.create_customer(customer_request()).await.is_ok());

        mock.set_method_error("create_customer", PaymentError::provider("nope"));
        assert!(mock.create_customer(customer_request()).await.is_err());
        mock.clear_errors();
        assert!(mock.create_customer(customer_request()).await.is_ok());
    }

    #[tokio::test]
    async fn parses_unsigned_webhooks() {
        let mock = MockPaymentProvider::new();
        let payload = serde_json::json!({
            "id": "evt_1",
            "type": "invoice.paid",
            "created": 1,
            "data": {"object": {"id": "in_1", "customer": "cus_1", "amount_paid": 999, "currency": "eur"}}
        })
        .to_string();

        let event = mock.verify_webhook(payload.as_bytes(), "t=1,v1=00").await.unwrap();
        assert_eq!(event.event_type, WebhookEventType::InvoicePaid);
        assert!(matches!(event.data, WebhookEventData::Invoice { amount_paid: 999, .. }));

        let rejecting = MockPaymentProvider::rejecting_webhooks();
        assert!(rejecting.verify_webhook(payload.as_bytes(), "x").await.is_err());
    }
}
