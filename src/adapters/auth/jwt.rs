//! HS256 JWT sessions.
//!
//! Issues and validates the bearer tokens handed out at login and
//! registration. Tokens are stateless: logout is a client-side concern.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::{SessionValidator, TokenIssuer};

/// Token claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    username: String,
    email: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a shared secret.
pub struct JwtSessionService {
    secret: SecretString,
    ttl: Duration,
}

impl JwtSessionService {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            ttl,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;
        validation
    }

    fn issue_at(&self, user: &AuthenticatedUser, now: i64) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            AuthError::service_unavailable("token signing failed")
        })
    }
}

impl TokenIssuer for JwtSessionService {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        self.issue_at(user, chrono::Utc::now().timestamp())
    }
}

#[async_trait]
impl SessionValidator for JwtSessionService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Self::validation(),
        )
        .map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::debug!(error = %e, "Token validation failed");
                    AuthError::InvalidToken
                }
            }
        })?;

        let claims = data.claims;
        let id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!(sub = %claims.sub, "Invalid user id in token");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(id, claims.username, claims.email, claims.role))
    }
}

impl std::fmt::Debug for JwtSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtSessionService {
        JwtSessionService::new("test-secret-at-least-32-bytes-long!!", Duration::from_secs(3600))
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::from_raw(1), "admin", "admin@example.com", Role::Admin)
    }

    #[tokio::test]
    async fn issued_token_validates_to_same_user() {
        let service = service();
        let token = service.issue(&admin()).unwrap();
        let user = service.validate(&token).await.unwrap();
        assert_eq!(user, admin());
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let service = service();
        let issued = chrono::Utc::now().timestamp() - 7200;
        let token = service.issue_at(&admin(), issued).unwrap();
        assert!(matches!(service.validate(&token).await, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn token_from_other_secret_is_rejected() {
        let other = JwtSessionService::new("another-secret-entirely-different!!", Duration::from_secs(60));
        let token = other.issue(&admin()).unwrap();
        assert!(matches!(service().validate(&token).await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        assert!(matches!(service().validate("not-a-jwt").await, Err(AuthError::InvalidToken)));
    }
}
