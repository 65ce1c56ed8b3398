//! Adapters - Implementations of port interfaces.
//!
//! - `postgres` - sqlx repositories
//! - `memory` - in-memory repositories for tests and local runs
//! - `stripe` - payment provider
//! - `ai` - OpenAI text generation
//! - `ml` - prediction microservice client
//! - `auth` - JWT sessions and Argon2 password hashing
//! - `http` - axum routes and middleware

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod ml;
pub mod postgres;
pub mod stripe;
