//! LoginHandler - Command handler for password logins.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::foundation::DomainError;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

/// Handler for logging in with username and password.
///
/// Unknown users and wrong passwords produce the same error.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
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

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, DomainError> {
        let user = self
            .users
            .find_by_username(cmd.username.trim())
            .await?
            .filter(|user| self.hasher.verify(&cmd.password, &user.password_hash))
            .ok_or_else(|| {
                tracing::info!(username = %cmd.username, "Rejected login");
                DomainError::unauthorized("Credenziali non valide")
            })?;

        let token = self.tokens.issue(&user.to_authenticated())?;
        Ok(LoginResult { user, token })
    }
}
