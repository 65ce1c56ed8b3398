//! Message repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PropertyId, Timestamp, UserId};
use crate::domain::messaging::{Message, NewMessage};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Every message the user sent or received.
    async fn for_user(&self, user_id: UserId) -> Result<Vec<Message>, DomainError>;

    /// Messages between two users about a listing, oldest first.
    async fn conversation(
        &self,
        property_id: PropertyId,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<Message>, DomainError>;

    async fn create(
        &self,
        sender: UserId,
        message: NewMessage,
        now: Timestamp,
    ) -> Result<Message, DomainError>;

    /// Marks messages from `sender` to `receiver` on a listing as read.
    /// Returns how many changed.
    async fn mark_read(
        &self,
        property_id: PropertyId,
        sender: UserId,
        receiver: UserId,
    ) -> Result<u64, DomainError>;
}
