//! GetConversationHandler - Query handler for one conversation.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PropertyId, UserId};
use crate::domain::messaging::Message;
use crate::ports::MessageRepository;

#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    pub user_id: UserId,
    pub property_id: PropertyId,
    pub other_user_id: UserId,
}

/// Returns the conversation oldest first, then marks what the caller
/// received as read. The returned messages reflect the state before marking.
pub struct GetConversationHandler {
    messages: Arc<dyn MessageRepository>,
}

impl GetConversationHandler {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn handle(&self, query: GetConversationQuery) -> Result<Vec<Message>, DomainError> {
        let conversation = self
            .messages
            .conversation(query.property_id, query.user_id, query.other_user_id)
            .await?;

        let marked = self
            .messages
            .mark_read(query.property_id, query.other_user_id, query.user_id)
            .await?;
        if marked > 0 {
            tracing::debug!(
                property_id = %query.property_id,
                user_id = %query.user_id,
                marked,
                "Messages marked read"
            );
        }

        Ok(conversation)
    }
}
