//! Authentication types for the domain layer.
//!
//! These types represent the caller of a request after their bearer token
//! was validated. They carry no token-format details: any `SessionValidator`
//! adapter can populate them.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token validation:
//! let user = AuthenticatedUser::new(UserId::new(7)?, "mario", "mario@example.com", Role::User);
//! request.extensions_mut().insert(user);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{DomainError, ErrorCode, UserId};

/// Account role. Admins can reach the moderation and dashboard endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parses a stored role string. Unknown values fall back to `User`.
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated caller extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails with `Forbidden` unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::forbidden("Accesso non autorizzato"))
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists in the system.
    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The token service is unavailable (misconfiguration, key issues).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => DomainError::forbidden(err.to_string()),
            AuthError::ServiceUnavailable(_) => {
                DomainError::new(ErrorCode::ExternalService, err.to_string())
            }
            _ => DomainError::unauthorized(err.to_string()),
        }
    }
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::from_raw(1), "mario", "mario@example.com", role)
    }

    #[test]
    fn admin_role_passes_admin_check() {
        assert!(user_with_role(Role::Admin).require_admin().is_ok());
    }

    #[test]
    fn plain_user_is_forbidden_from_admin_actions() {
        let err = user_with_role(Role::User).require_admin().unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::Forbidden);
    }

    #[test]
    fn role_parses_stored_strings() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("user"), Role::User);
        assert_eq!(Role::parse("moderator"), Role::User);
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::UserNotFound.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("key missing").is_transient());
        assert!(!AuthError::TokenExpired.is_transient());
    }
}
