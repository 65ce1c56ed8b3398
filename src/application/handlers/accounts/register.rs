//! RegisterHandler - Command handler for creating accounts.

use std::sync::Arc;

use crate::domain::account::{validate_registration, NewUser, User};
use crate::domain::foundation::{DomainError, Role, Timestamp};
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: Option<String>,
}

/// The created user and a session token for it.
#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user: User,
    pub token: String,
}

/// Handler for account registration.
///
/// Username and email must both be unused. Every account starts with the
/// `user` role and one free listing.
pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl RegisterHandler {
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

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterResult, DomainError> {
        // 1. Validate input
        validate_registration(&cmd.username, &cmd.password, &cmd.email)?;
        let username = cmd.username.trim().to_string();
        let email = cmd.email.trim().to_string();

        // 2. Check uniqueness
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(DomainError::validation("username", "Username già in uso"));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::validation("email", "Email già in uso"));
        }

        // 3. Hash and persist
        let password_hash = self.hasher.hash(&cmd.password)?;
        let user = self
            .users
            .create(
                NewUser {
                    username,
                    password_hash,
                    email,
                    name: cmd.name.filter(|n| !n.trim().is_empty()),
                    role: Role::User,
                },
                Timestamp::now(),
            )
            .await?;

        // 4. Open a session
        let token = self.tokens.issue(&user.to_authenticated())?;

        tracing::info!(user_id = %user.id, username = %user.username, "Account registered");

        Ok(RegisterResult { user, token })
    }
}
