//! Router harness for HTTP tests.
//!
//! Wires the full API over the in-memory store, the JWT session service and
//! the mock external services. Mocks share state across clones, so tests can
//! script them after the router is built.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::adapters::ai::MockTextGenerator;
use crate::adapters::auth::JwtSessionService;
use crate::adapters::memory::InMemoryStore;
use crate::adapters::ml::MockMlService;
use crate::adapters::stripe::MockPaymentProvider;
use crate::application::handlers::accounts::test_support::PlainHasher;
use crate::domain::account::user::test_user;
use crate::domain::account::User;
use crate::domain::billing::PlanPrices;
use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::domain::listing::City;
use crate::ports::TokenIssuer;

use super::middleware::RequestMetrics;
use super::router::{api_router, ApiDependencies};

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub payments: MockPaymentProvider,
    pub text: MockTextGenerator,
    pub ml: MockMlService,
    pub sessions: Arc<JwtSessionService>,
    pub deps: ApiDependencies,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(InMemoryStore::new())
    }

    pub fn with_cities(cities: Vec<City>) -> Self {
        Self::with_store(InMemoryStore::with_cities(cities))
    }

    fn with_store(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        let payments = MockPaymentProvider::new();
        let text = MockTextGenerator::new();
        let ml = MockMlService::new();
        let sessions = Arc::new(JwtSessionService::new(
            "test-secret",
            Duration::from_secs(3600),
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
            payments: Arc::new(payments.clone()),
            text_generator: Arc::new(text.clone()),
            ml: Arc::new(ml.clone()),
            sessions: sessions.clone(),
            tokens: sessions.clone(),
            password_hasher: Arc::new(PlainHasher),
            prices: PlanPrices::default(),
            metrics: Arc::new(RequestMetrics::new()),
        };

        Self {
            store,
            payments,
            text,
            ml,
            sessions,
            router: api_router(deps.clone()),
            deps,
        }
    }

    /// Inserts `user` and returns a bearer token for it.
    pub async fn login_as(&self, user: User) -> String {
        let caller = AuthenticatedUser::new(user.id, &user.username, &user.email, user.role);
        self.store.insert_user(user).await;
        self.sessions.issue(&caller).unwrap()
    }

    /// A plain user with the given id.
    pub async fn user(&self, id: i32) -> String {
        self.login_as(test_user(id)).await
    }

    pub async fn admin(&self, id: i32) -> String {
        let mut user = test_user(id);
        user.role = Role::Admin;
        self.login_as(user).await
    }

    pub async fn request(
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

    /// Sends a prebuilt request; the body is parsed as JSON when present.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }
}
