//! SendMessageHandler - Command handler for sending a message.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::messaging::{Message, NewMessage};
use crate::ports::{MessageRepository, PropertyRepository};

use crate::application::handlers::listings::require_property;

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub sender_id: UserId,
    pub message: NewMessage,
}

pub struct SendMessageHandler {
    messages: Arc<dyn MessageRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl SendMessageHandler {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            messages,
            properties,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<Message, DomainError> {
        // 1. Validate content and recipient
        cmd.message.validate(cmd.sender_id)?;

        // 2. The listing must exist
        require_property(self.properties.as_ref(), cmd.message.property_id).await?;

        // 3. Persist
        let message = self
            .messages
            .create(cmd.sender_id, cmd.message, Timestamp::now())
            .await?;

        tracing::info!(
            message_id = %message.id,
            property_id = %message.property_id,
            sender_id = %message.sender_id,
            "Message sent"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, PropertyId};
    use crate::domain::listing::property::sample_new_property;

    fn command(property_id: PropertyId, to: i32, content: &str) -> SendMessageCommand {
        SendMessageCommand {
            sender_id: UserId::from_raw(1),
            message: NewMessage {
                property_id,
                receiver_id: UserId::from_raw(to),
                content: content.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn message_about_existing_listing_is_stored() {
        let store = Arc::new(InMemoryStore::new());
        let property = PropertyRepository::create(
            store.as_ref(),
            UserId::from_raw(2),
            sample_new_property(),
            Timestamp::now(),
        )
        .await
        .unwrap();

        let message = SendMessageHandler::new(store.clone(), store.clone())
            .handle(command(property.id, 2, "  Posso visitarla?  "))
            .await
            .unwrap();

        assert_eq!(message.content, "Posso visitarla?");
        assert!(!message.is_read);
        assert_eq!(store.for_user(UserId::from_raw(2)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = SendMessageHandler::new(store.clone(), store)
            .handle(command(PropertyId::from_raw(99), 2, "ciao"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn empty_or_self_addressed_messages_are_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let handler = SendMessageHandler::new(store.clone(), store);

        let err = handler
            .handle(command(PropertyId::from_raw(1), 2, "   "))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = handler
            .handle(command(PropertyId::from_raw(1), 1, "ciao"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
