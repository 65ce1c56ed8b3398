//! Assembles every area router into the API served by the binary.
//!
//! `api_router` wires routes, authentication and request metrics over a set
//! of port implementations. `app` adds the transport layers (tracing, request
//! ids, CORS, timeout, compression) configured from `ServerConfig`.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::domain::billing::PlanPrices;
use crate::ports::{
    AnalyticsReader, CityRepository, DocumentRepository, EngagementRepository, MessageRepository,
    MlService, PasswordHasher, PaymentProvider, PriceStatsRepository, PropertyRepository,
    ReviewRepository, SessionValidator, TextGenerator, TokenIssuer, UserRepository,
    WebhookEventRepository,
};

use super::accounts::{accounts_router, AccountsAppState};
use super::admin::{admin_router, AdminAppState};
use super::billing::{billing_router, BillingAppState};
use super::content::{content_router, ContentAppState};
use super::documents::{documents_router, DocumentsAppState};
use super::engagement::{engagement_router, EngagementAppState};
use super::listings::{listings_router, ListingsAppState};
use super::messaging::{messaging_router, MessagingAppState};
use super::middleware::{auth_middleware, metrics_middleware, RequestMetrics};
use super::ml::{ml_router, MlAppState};
use super::pricing::{pricing_router, PricingAppState};
use super::reviews::{reviews_router, ReviewsAppState};

/// Every port the HTTP surface depends on.
#[derive(Clone)]
pub struct ApiDependencies {
    pub users: Arc<dyn UserRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub cities: Arc<dyn CityRepository>,
    pub price_stats: Arc<dyn PriceStatsRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub engagement: Arc<dyn EngagementRepository>,
    pub analytics: Arc<dyn AnalyticsReader>,
    pub webhook_events: Arc<dyn WebhookEventRepository>,
    pub payments: Arc<dyn PaymentProvider>,
    pub text_generator: Arc<dyn TextGenerator>,
    pub ml: Arc<dyn MlService>,
    pub sessions: Arc<dyn SessionValidator>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub prices: PlanPrices,
    pub metrics: Arc<RequestMetrics>,
}

/// All `/api` routes with authentication and metrics applied.
pub fn api_router(deps: ApiDependencies) -> Router {
    let accounts = AccountsAppState::new(
        deps.users.clone(),
        deps.password_hasher.clone(),
        deps.tokens.clone(),
    );
    let listings = ListingsAppState::new(
        deps.users.clone(),
        deps.properties.clone(),
        deps.cities.clone(),
    );
    let billing = BillingAppState::new(
        deps.users.clone(),
        deps.payments.clone(),
        deps.webhook_events.clone(),
        deps.prices.clone(),
    );
    let pricing = PricingAppState::new(deps.properties.clone(), deps.price_stats.clone());
    let messaging = MessagingAppState::new(deps.messages.clone(), deps.properties.clone());
    let reviews = ReviewsAppState::new(deps.reviews.clone(), deps.properties.clone());
    let documents = DocumentsAppState::new(deps.documents.clone());
    let engagement = EngagementAppState::new(deps.engagement.clone(), deps.properties.clone());
    let content = ContentAppState::new(deps.text_generator.clone());
    let ml = MlAppState::new(
        deps.users.clone(),
        deps.properties.clone(),
        deps.analytics.clone(),
        deps.ml.clone(),
    );
    let admin = AdminAppState::new(
        deps.analytics.clone(),
        deps.reviews.clone(),
        deps.metrics.clone(),
    );

    Router::new()
        .merge(accounts_router().with_state(accounts))
        .merge(listings_router().with_state(listings))
        .merge(billing_router().with_state(billing))
        .merge(pricing_router().with_state(pricing))
        .merge(messaging_router().with_state(messaging))
        .merge(reviews_router().with_state(reviews))
        .merge(documents_router().with_state(documents))
        .merge(engagement_router().with_state(engagement))
        .merge(content_router().with_state(content))
        .merge(ml_router().with_state(ml))
        .merge(admin_router().with_state(admin))
        .layer(from_fn_with_state(deps.sessions.clone(), auth_middleware))
        .layer(from_fn_with_state(deps.metrics.clone(), metrics_middleware))
}

/// The API plus transport layers. The last layer added runs first.
pub fn app(deps: ApiDependencies, server: &ServerConfig) -> Router {
    api_router(deps)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// No configured origins means any origin, which suits local development.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}
