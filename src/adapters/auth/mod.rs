//! Authentication adapters.
//!
//! - `jwt` - HS256 session tokens (`SessionValidator` + `TokenIssuer`)
//! - `password` - Argon2id `PasswordHasher`
//! - `mock` - token table for tests

mod jwt;
mod mock;
mod password;

pub use jwt::JwtSessionService;
pub use mock::MockSessionValidator;
pub use password::Argon2PasswordHasher;
