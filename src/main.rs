//! In&Out API server.
//!
//! Startup order: configuration, tracing, database pool (and migrations when
//! enabled), adapters, then the axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use in_and_out::adapters::ai::{OpenAIConfig, OpenAIProvider};
use in_and_out::adapters::auth::{Argon2PasswordHasher, JwtSessionService};
use in_and_out::adapters::http::middleware::RequestMetrics;
use in_and_out::adapters::http::{app, ApiDependencies};
use in_and_out::adapters::ml::HttpMlService;
use in_and_out::adapters::postgres::{
    PostgresAnalyticsReader, PostgresCityRepository, PostgresDocumentRepository,
    PostgresEngagementRepository, PostgresMessageRepository, PostgresPriceStatsRepository,
    PostgresPropertyRepository, PostgresReviewRepository, PostgresUserRepository,
    PostgresWebhookEventRepository,
};
use in_and_out::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use in_and_out::application::handlers::billing::{
    PruneWebhookEventsCommand, PruneWebhookEventsHandler,
};
use in_and_out::config::{AppConfig, ServerConfig};
use in_and_out::domain::foundation::Timestamp;
use in_and_out::ports::WebhookEventRepository;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        stripe_live = config.payment.is_live_mode(),
        openai = config.ai.has_openai(),
        "Configuration loaded"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let deps = build_dependencies(&config, pool);
    spawn_webhook_pruning(&config, deps.webhook_events.clone());
    let router = app(deps, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "In&Out API listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn build_dependencies(config: &AppConfig, pool: sqlx::PgPool) -> ApiDependencies {
    let sessions = Arc::new(JwtSessionService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl(),
    ));

    let stripe = StripeConfig::new(
        config.payment.stripe_api_key.clone(),
        config.payment.stripe_webhook_secret.clone(),
    )
    .with_require_livemode(config.payment.require_livemode);

    let openai = OpenAIConfig::new(config.ai.openai_api_key.clone().unwrap_or_default())
        .with_model(config.ai.model.clone())
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries);

    let webhook_events = Arc::new(PostgresWebhookEventRepository::new(pool.clone()));

    ApiDependencies {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        properties: Arc::new(PostgresPropertyRepository::new(pool.clone())),
        cities: Arc::new(PostgresCityRepository::new(pool.clone())),
        price_stats: Arc::new(PostgresPriceStatsRepository::new(pool.clone())),
        messages: Arc::new(PostgresMessageRepository::new(pool.clone())),
        reviews: Arc::new(PostgresReviewRepository::new(pool.clone())),
        documents: Arc::new(PostgresDocumentRepository::new(pool.clone())),
        engagement: Arc::new(PostgresEngagementRepository::new(pool.clone())),
        analytics: Arc::new(PostgresAnalyticsReader::new(pool)),
        webhook_events,
        payments: Arc::new(StripePaymentAdapter::new(stripe)),
        text_generator: Arc::new(OpenAIProvider::new(openai)),
        ml: Arc::new(HttpMlService::new(
            config.ml.base_url.clone(),
            config.ml.timeout(),
        )),
        sessions: sessions.clone(),
        tokens: sessions,
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
        prices: config.payment.plan_prices(),
        metrics: Arc::new(RequestMetrics::new()),
    }
}

/// Trims the webhook ledger on a fixed interval for the life of the process.
fn spawn_webhook_pruning(config: &AppConfig, ledger: Arc<dyn WebhookEventRepository>) {
    let handler = PruneWebhookEventsHandler::new(ledger);
    let retention_days = config.payment.webhook_retention_days;
    let mut ticker = tokio::time::interval(config.payment.webhook_prune_interval());

    tokio::spawn(async move {
        loop {
            ticker.tick().await;
            let cmd = PruneWebhookEventsCommand {
                now: Timestamp::now(),
                retention_days,
            };
            if let Err(e) = handler.handle(cmd).await {
                tracing::warn!(error = %e, "Webhook ledger pruning failed");
            }
        }
    });
}

/// `RUST_LOG` wins over the configured level. JSON output in production.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
