//! HTTP adapter for account endpoints.
//!
//! - `POST /api/register` - Create an account and start a session
//! - `POST /api/login` - Exchange credentials for a bearer token
//! - `POST /api/logout` - End the session (client discards the token)
//! - `GET /api/user`, `GET /api/users/me` - Current user
//! - `PUT /api/users/me` - Partial profile update
//! - `GET /api/user/publishing-rights` - Whether the caller may publish

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AccountsAppState;
pub use routes::accounts_router;
