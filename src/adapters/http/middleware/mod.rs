//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `auth` - Authentication middleware and extractors
//! - `metrics` - Request counters behind the monitoring endpoint

pub mod auth;
pub mod metrics;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth, LOGIN_REQUIRED};
pub use metrics::{metrics_middleware, MetricsState, RequestMetrics};
