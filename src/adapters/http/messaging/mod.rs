//! HTTP adapter for chat endpoints.
//!
//! - `GET /api/chats` - Conversations grouped by listing and counterpart
//! - `GET /api/messages/:propertyId/:userId` - One conversation, marks it read
//! - `POST /api/messages` - Send a message about a listing
//!
//! Request bodies are the domain `NewMessage` type, so there is no DTO module.

pub mod handlers;
pub mod routes;

pub use handlers::MessagingAppState;
pub use routes::messaging_router;
