//! Ports - Interfaces for external dependencies.
//!
//! Ports define the contracts between the application layer and the outside
//! world. Adapters implement them.
//!
//! ## Persistence
//!
//! - `UserRepository`, `PropertyRepository`, `CityRepository`
//! - `PriceStatsRepository`, `MessageRepository`, `ReviewRepository`
//! - `DocumentRepository`, `EngagementRepository`
//! - `AnalyticsReader` - aggregate queries for admin and ML
//! - `WebhookEventRepository` - Stripe webhook idempotency ledger
//!
//! ## External services
//!
//! - `PaymentProvider` - Stripe
//! - `TextGenerator` - OpenAI chat completions
//! - `MlService` - Python ML microservice
//!
//! ## Sessions
//!
//! - `SessionValidator`, `TokenIssuer`, `PasswordHasher`

mod analytics_reader;
mod city_repository;
mod document_repository;
mod engagement_repository;
mod message_repository;
mod ml_service;
mod payment_provider;
mod price_stats_repository;
mod property_repository;
mod review_repository;
mod session_validator;
mod text_generator;
mod user_repository;
mod webhook_event_repository;

pub use analytics_reader::AnalyticsReader;
pub use city_repository::CityRepository;
pub use document_repository::DocumentRepository;
pub use engagement_repository::EngagementRepository;
pub use message_repository::MessageRepository;
pub use ml_service::{MlError, MlModel, MlService};
pub use payment_provider::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentErrorCode, PaymentIntent, PaymentProvider, Subscription,
    SubscriptionStatus, WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use price_stats_repository::PriceStatsRepository;
pub use property_repository::PropertyRepository;
pub use review_repository::ReviewRepository;
pub use session_validator::{PasswordHasher, SessionValidator, TokenIssuer};
pub use text_generator::{AIError, GenerationRequest, TextGenerator};
pub use user_repository::UserRepository;
pub use webhook_event_repository::{
    SaveResult, WebhookEventRecord, WebhookEventRepository, WebhookOutcome,
};
