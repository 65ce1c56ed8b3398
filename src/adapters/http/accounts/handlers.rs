//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::accounts::{
    GetCurrentUserHandler, GetCurrentUserQuery, GetPublishingRightsHandler,
    GetPublishingRightsQuery, LoginCommand, LoginHandler, RegisterCommand, RegisterHandler,
    UpdateProfileCommand, UpdateProfileHandler,
};
use crate::domain::account::ProfileUpdate;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::dto::{LoginRequest, RegisterRequest, SessionResponse, SuccessResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AccountsAppState {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl AccountsAppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.users.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone())
    }

    pub fn publishing_rights_handler(&self) -> GetPublishingRightsHandler {
        GetPublishingRightsHandler::new(self.users.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/register
pub async fn register(
    State(state): State<AccountsAppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .register_handler()
        .handle(RegisterCommand {
            username: req.username,
            password: req.password,
            email: req.email,
            name: req.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            user: result.user,
            token: result.token,
        }),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<AccountsAppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .handle(LoginCommand {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(SessionResponse {
        user: result.user,
        token: result.token,
    }))
}

/// POST /api/logout - tokens are stateless, the client drops its copy
pub async fn logout() -> impl IntoResponse {
    Json(SuccessResponse { success: true })
}

// ════════════════════════════════════════════════════════════════════════════════
// Profile
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/user and GET /api/users/me
pub async fn current_user(
    State(state): State<AccountsAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .current_user_handler()
        .handle(GetCurrentUserQuery { user_id: user.id })
        .await?;
    Ok(Json(user))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AccountsAppState>,
    RequireAuth(user): RequireAuth,
    Json(update): Json<ProfileUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            user_id: user.id,
            update,
        })
        .await?;
    Ok(Json(user))
}

/// GET /api/user/publishing-rights
pub async fn publishing_rights(
    State(state): State<AccountsAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let rights = state
        .publishing_rights_handler()
        .handle(GetPublishingRightsQuery { user_id: user.id })
        .await?;
    Ok(Json(rights))
}
