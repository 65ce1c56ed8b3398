//! ListChatsHandler - Query handler for the caller's inbox.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::messaging::{summarize_chats, ChatSummary};
use crate::ports::{MessageRepository, PropertyRepository};

#[derive(Debug, Clone)]
pub struct ListChatsQuery {
    pub user_id: UserId,
}

pub struct ListChatsHandler {
    messages: Arc<dyn MessageRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl ListChatsHandler {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            messages,
            properties,
        }
    }

    pub async fn handle(&self, query: ListChatsQuery) -> Result<Vec<ChatSummary>, DomainError> {
        let messages = self.messages.for_user(query.user_id).await?;

        let property_ids: BTreeSet<_> = messages.iter().map(|m| m.property_id).collect();
        let mut titles = HashMap::with_capacity(property_ids.len());
        for id in property_ids {
            if let Some(property) = self.properties.find_by_id(id).await? {
                titles.insert(id, property.title);
            }
        }

        Ok(summarize_chats(query.user_id, &messages, |id| {
            titles.get(&id).cloned()
        }))
    }
}
