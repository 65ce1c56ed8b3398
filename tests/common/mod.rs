//! Shared harness for the HTTP integration tests.
//!
//! Builds the full API over the in-memory store with real JWT sessions,
//! Argon2 hashing and the real Stripe webhook verifier. Outbound calls go
//! to mocks.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use in_and_out::adapters::ai::MockTextGenerator;
use in_and_out::adapters::auth::{Argon2PasswordHasher, JwtSessionService};
use in_and_out::adapters::http::middleware::RequestMetrics;
use in_and_out::adapters::http::{api_router, ApiDependencies};
use in_and_out::adapters::memory::InMemoryStore;
use in_and_out::adapters::ml::MockMlService;
use in_and_out::adapters::stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
use in_and_out::domain::billing::PlanPrices;
use in_and_out::ports::PaymentProvider;

pub const WEBHOOK_SECRET: &str = "whsec_integration";

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub payments: MockPaymentProvider,
    router: Router,
}

impl Harness {
    /// Mock payments for every Stripe call.
    pub fn new() -> Self {
        let payments = MockPaymentProvider::new();
        Self::build(Arc::new(payments.clone()), payments)
    }

    /// The real Stripe adapter, for signature verification. Calls that
    /// would reach the network are not exercised.
    pub fn with_stripe_verifier() -> Self {
        let stripe = StripePaymentAdapter::new(StripeConfig::new("sk_test_integration", WEBHOOK_SECRET));
        Self::build(Arc::new(stripe), MockPaymentProvider::new())
    }

    fn build(provider: Arc<dyn PaymentProvider>, payments: MockPaymentProvider) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let sessions = Arc::new(JwtSessionService::new(
            "integration-secret",
            Duration::from_secs(600),
        ));
        let deps = ApiDependencies {
            users: store.clone(),
            properties: store.clone(),
            cities: store.clone(),
            price_stats: store.clone(),
            messages: store.clone(),
            reviews: store.clone(),
            documents: store.clone(),
            engagement: store.clone(),
            analytics: store.clone(),
            webhook_events: store.clone(),
            payments: provider,
            text_generator: Arc::new(MockTextGenerator::new()),
            ml: Arc::new(MockMlService::new()),
            sessions: sessions.clone(),
            tokens: sessions,
            password_hasher: Arc::new(Argon2PasswordHasher::new()),
            prices: PlanPrices::default(),
            metrics: Arc::new(RequestMetrics::new()),
        };

        Self {
            store,
            payments,
            router: api_router(deps),
        }
    }

    /// Registers `username` and returns `(user id, token)`.
    pub async fn register(&self, username: &str) -> (i64, String) {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/register",
                None,
                Some(json!({
                    "username": username,
                    "password": "password123",
                    "email": format!("{}@example.com", username),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        let id = body["user"]["id"].as_i64().unwrap();
        let token = body["token"].as_str().unwrap().to_string();
        (id, token)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

pub fn listing(title: &str, city: &str, price: i32) -> Value {
    json!({
        "title": title,
        "description": "Appartamento luminoso",
        "propertyType": "bilocale",
        "price": price,
        "country": "IT",
        "city": city,
        "address": "Via Roma 1",
        "latitude": 45.46,
        "longitude": 9.19
    })
}
