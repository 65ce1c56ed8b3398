use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MessageId, PropertyId, Timestamp, UserId};
use crate::domain::messaging::{Message, NewMessage};
use crate::ports::MessageRepository;

use super::InMemoryStore;

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn for_user(&self, user_id: UserId) -> Result<Vec<Message>, DomainError> {
        let state = self.state.read().await;
        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(messages)
    }

    async fn conversation(
        &self,
        property_id: PropertyId,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<Message>, DomainError> {
        let state = self.state.read().await;
        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| m.property_id == property_id && m.is_between(a, b))
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.created_at, m.id));
        Ok(messages)
    }

    async fn create(
        &self,
        sender: UserId,
        message: NewMessage,
        now: Timestamp,
    ) -> Result<Message, DomainError> {
        let mut state = self.state.write().await;
        let message = Message {
            id: MessageId::from_raw(state.next_id()),
            property_id: message.property_id,
            sender_id: sender,
            receiver_id: message.receiver_id,
            content: message.content.trim().to_string(),
            created_at: now,
            is_read: false,
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn mark_read(
        &self,
        property_id: PropertyId,
        sender: UserId,
        receiver: UserId,
    ) -> Result<u64, DomainError> {
        let mut state = self.state.write().await;
        let mut changed = 0;
        for message in state.messages.iter_mut().filter(|m| {
            m.property_id == property_id && m.sender_id == sender && m.receiver_id == receiver && !m.is_read
        }) {
            message.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(to: i32, content: &str) -> NewMessage {
        NewMessage {
            property_id: PropertyId::from_raw(1),
            receiver_id: UserId::from_raw(to),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn conversation_is_oldest_first_and_marks_read_one_direction() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let (a, b) = (UserId::from_raw(1), UserId::from_raw(2));

        store.create(a, new_message(2, "ciao"), now.minus_days(1)).await.unwrap();
        store.create(b, new_message(1, "salve"), now).await.unwrap();

        let convo = store.conversation(PropertyId::from_raw(1), b, a).await.unwrap();
        assert_eq!(convo[0].content, "ciao");
        assert_eq!(convo[1].content, "salve");

        assert_eq!(store.mark_read(PropertyId::from_raw(1), a, b).await.unwrap(), 1);
        assert_eq!(store.mark_read(PropertyId::from_raw(1), a, b).await.unwrap(), 0);

        let for_a = store.for_user(a).await.unwrap();
        assert!(!for_a.iter().find(|m| m.sender_id == b).unwrap().is_read);
    }
}
