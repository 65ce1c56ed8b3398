//! Direct messages between users about a listing.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, PropertyId, Timestamp, UserId, ValidationError};

/// Maximum message length, in characters.
pub const MAX_MESSAGE_LEN: usize = 5000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub property_id: PropertyId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub created_at: Timestamp,
    pub is_read: bool,
}

impl Message {
    /// The participant that is not `user_id`.
    pub fn counterpart(&self, user_id: UserId) -> UserId {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }

    /// Whether this message belongs to the conversation between `a` and `b`.
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        (self.sender_id == a && self.receiver_id == b) || (self.sender_id == b && self.receiver_id == a)
    }
}

/// Message as submitted by a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub property_id: PropertyId,
    pub receiver_id: UserId,
    pub content: String,
}

impl NewMessage {
    pub fn validate(&self, sender_id: UserId) -> Result<(), ValidationError> {
        let len = self.content.trim().chars().count();
        if len == 0 {
            return Err(ValidationError::empty_field("content"));
        }
        if len > MAX_MESSAGE_LEN {
            return Err(ValidationError::out_of_range(
                "content",
                1,
                MAX_MESSAGE_LEN as i64,
                len as i64,
            ));
        }
        if self.receiver_id == sender_id {
            return Err(ValidationError::invalid_format(
                "receiverId",
                "cannot send a message to yourself",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(content: &str, receiver: i32) -> NewMessage {
        NewMessage {
            property_id: PropertyId::from_raw(1),
            receiver_id: UserId::from_raw(receiver),
            content: content.to_string(),
        }
    }

    #[test]
    fn blank_messages_are_rejected() {
        assert!(new_message("   ", 2).validate(UserId::from_raw(1)).is_err());
    }

    #[test]
    fn messages_to_self_are_rejected() {
        let err = new_message("ciao", 1).validate(UserId::from_raw(1)).unwrap_err();
        assert_eq!(err.field(), "receiverId");
    }

    #[test]
    fn counterpart_is_the_other_participant() {
        let message = Message {
            id: MessageId::from_raw(1),
            property_id: PropertyId::from_raw(1),
            sender_id: UserId::from_raw(1),
            receiver_id: UserId::from_raw(2),
            content: "ciao".into(),
            created_at: Timestamp::now(),
            is_read: false,
        };
        assert_eq!(message.counterpart(UserId::from_raw(1)), UserId::from_raw(2));
        assert_eq!(message.counterpart(UserId::from_raw(2)), UserId::from_raw(1));
        assert!(message.is_between(UserId::from_raw(2), UserId::from_raw(1)));
        assert!(!message.is_between(UserId::from_raw(2), UserId::from_raw(3)));
    }
}
