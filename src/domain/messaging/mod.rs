//! Messaging domain module.
//!
//! Messages exchanged between a listing's owner and interested users, and
//! the inbox view grouping them into chats.

mod chat;
mod message;

pub use chat::{summarize_chats, ChatSummary};
pub use message::{Message, NewMessage, MAX_MESSAGE_LEN};
