//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change state, query handlers only read it. Every handler
//! owns its dependencies as `Arc<dyn Port>` so the HTTP layer can build one
//! per request from shared state.

pub mod handlers;
