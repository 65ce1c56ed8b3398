//! In-process request metrics for the monitoring dashboard.
//!
//! Every request that passes through `metrics_middleware` bumps the request
//! counter and records its latency. Responses with a 5xx status count as
//! errors. `RequestMetrics::snapshot` turns the counters into the
//! `MetricsSnapshot` served by `GET /api/admin/metrics`.
//!
//! ```ignore
//! let metrics = Arc::new(RequestMetrics::new());
//! let app = Router::new()
//!     .route("/api/properties", get(list_properties))
//!     .layer(middleware::from_fn_with_state(metrics.clone(), metrics_middleware));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::domain::admin::MetricsSnapshot;
use crate::domain::foundation::Timestamp;

/// Lock-free request counters shared by every connection.
#[derive(Debug)]
pub struct RequestMetrics {
    started: Instant,
    requests: AtomicU64,
    errors: AtomicU64,
    total_ms: AtomicU64,
    min_ms: AtomicU64,
    max_ms: AtomicU64,
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            requests: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            total_ms: AtomicU64::new(0),
            min_ms: AtomicU64::new(u64::MAX),
            max_ms: AtomicU64::new(0),
        }
    }

    pub fn record(&self, elapsed_ms: u64, is_error: bool) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if is_error {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
        self.total_ms.fetch_add(elapsed_ms, Ordering::Relaxed);
        self.min_ms.fetch_min(elapsed_ms, Ordering::Relaxed);
        self.max_ms.fetch_max(elapsed_ms, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::new(
            self.started.elapsed().as_secs(),
            self.requests.load(Ordering::Relaxed),
            self.errors.load(Ordering::Relaxed),
            self.total_ms.load(Ordering::Relaxed),
            self.min_ms.load(Ordering::Relaxed),
            self.max_ms.load(Ordering::Relaxed),
            Timestamp::now(),
        )
    }
}

/// Metrics middleware state.
pub type MetricsState = Arc<RequestMetrics>;

pub async fn metrics_middleware(
    State(metrics): State<MetricsState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    metrics.record(elapsed_ms, response.status().is_server_error());
    response
}
