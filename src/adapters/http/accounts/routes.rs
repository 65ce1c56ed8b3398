//! Axum router configuration for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    current_user, login, logout, publishing_rights, register, update_profile, AccountsAppState,
};

/// Create the accounts API router.
///
/// # Routes
///
/// ## Public
/// - `POST /api/register`
/// - `POST /api/login`
/// - `POST /api/logout`
///
/// ## Authenticated
/// - `GET /api/user`
/// - `GET /api/users/me`, `PUT /api/users/me`
/// - `GET /api/user/publishing-rights`
pub fn accounts_router() -> Router<AccountsAppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/user", get(current_user))
        .route("/api/users/me", get(current_user).put(update_profile))
        .route("/api/user/publishing-rights", get(publishing_rights))
}
