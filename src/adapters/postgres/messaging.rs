//! PostgreSQL implementation of MessageRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, MessageId, PropertyId, Timestamp, UserId};
use crate::domain::messaging::{Message, NewMessage};
use crate::ports::MessageRepository;

use super::{db_error, ts};

pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i32,
    property_id: i32,
    sender_id: i32,
    receiver_id: i32,
    content: String,
    created_at: DateTime<Utc>,
    is_read: bool,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: MessageId::from_raw(row.id),
            property_id: PropertyId::from_raw(row.property_id),
            sender_id: UserId::from_raw(row.sender_id),
            receiver_id: UserId::from_raw(row.receiver_id),
            content: row.content,
            created_at: ts(row.created_at),
            is_read: row.is_read,
        }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn for_user(&self, user_id: UserId) -> Result<Vec<Message>, DomainError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, property_id, sender_id, receiver_id, content, created_at, is_read
            FROM messages
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load messages"))?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn conversation(
        &self,
        property_id: PropertyId,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<Message>, DomainError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, property_id, sender_id, receiver_id, content, created_at, is_read
            FROM messages
            WHERE property_id = $1
              AND ((sender_id = $2 AND receiver_id = $3) OR (sender_id = $3 AND receiver_id = $2))
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(property_id.as_i32())
        .bind(a.as_i32())
        .bind(b.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load conversation"))?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn create(
        &self,
        sender: UserId,
        message: NewMessage,
        now: Timestamp,
    ) -> Result<Message, DomainError> {
        let row: MessageRow = sqlx::query_as(
            r#"
            INSERT INTO messages (property_id, sender_id, receiver_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, property_id, sender_id, receiver_id, content, created_at, is_read
            "#,
        )
        .bind(message.property_id.as_i32())
        .bind(sender.as_i32())
        .bind(message.receiver_id.as_i32())
        .bind(message.content.trim())
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("send message"))?;

        Ok(row.into())
    }

    async fn mark_read(
        &self,
        property_id: PropertyId,
        sender: UserId,
        receiver: UserId,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE messages SET is_read = TRUE
            WHERE property_id = $1 AND sender_id = $2 AND receiver_id = $3 AND NOT is_read
            "#,
        )
        .bind(property_id.as_i32())
        .bind(sender.as_i32())
        .bind(receiver.as_i32())
        .execute(&self.pool)
        .await
        .map_err(db_error("mark messages read"))?;

        Ok(result.rows_affected())
    }
}
