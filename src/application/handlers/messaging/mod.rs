//! Messaging handlers.
//!
//! ## Commands
//! - Sending a message about a listing
//!
//! ## Queries
//! - Inbox grouped by conversation
//! - A single conversation (marks received messages read)

mod get_conversation;
mod list_chats;
mod send_message;

// Commands
pub use send_message::{SendMessageCommand, SendMessageHandler};

// Queries
pub use get_conversation::{GetConversationHandler, GetConversationQuery};
pub use list_chats::{ListChatsHandler, ListChatsQuery};
