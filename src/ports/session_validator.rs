//! Session ports: validating bearer tokens and issuing new ones.
//!
//! The HTTP middleware only sees [`SessionValidator`]; login and
//! registration use [`TokenIssuer`]. Both are implemented by the JWT
//! session service.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts the caller.
///
/// Implementations return `AuthError::InvalidToken` for malformed or
/// badly signed tokens and `AuthError::TokenExpired` for expired ones.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the raw value without the `Bearer ` prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Issues access tokens for a freshly authenticated user.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// False on mismatch or when `hash` is not a recognised hash string.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports_are_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
        assert_send_sync::<dyn TokenIssuer>();
        assert_send_sync::<dyn PasswordHasher>();
    }
}
