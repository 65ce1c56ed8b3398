//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::messaging::{
    GetConversationHandler, GetConversationQuery, ListChatsHandler, ListChatsQuery,
    SendMessageCommand, SendMessageHandler,
};
use crate::domain::foundation::{PropertyId, UserId};
use crate::domain::messaging::NewMessage;
use crate::ports::{MessageRepository, PropertyRepository};

#[derive(Clone)]
pub struct MessagingAppState {
    pub messages: Arc<dyn MessageRepository>,
    pub properties: Arc<dyn PropertyRepository>,
}

impl MessagingAppState {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            messages,
            properties,
        }
    }

    pub fn list_chats_handler(&self) -> ListChatsHandler {
        ListChatsHandler::new(self.messages.clone(), self.properties.clone())
    }

    pub fn conversation_handler(&self) -> GetConversationHandler {
        GetConversationHandler::new(self.messages.clone())
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.messages.clone(), self.properties.clone())
    }
}

/// GET /api/chats
pub async fn list_chats(
    State(state): State<MessagingAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let chats = state
        .list_chats_handler()
        .handle(ListChatsQuery { user_id: user.id })
        .await?;
    Ok(Json(chats))
}

/// GET /api/messages/:propertyId/:userId
pub async fn get_conversation(
    State(state): State<MessagingAppState>,
    RequireAuth(user): RequireAuth,
    Path((property_id, other_user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let property_id: PropertyId = property_id.parse()?;
    let other_user_id: UserId = other_user_id.parse()?;
    let messages = state
        .conversation_handler()
        .handle(GetConversationQuery {
            user_id: user.id,
            property_id,
            other_user_id,
        })
        .await?;
    Ok(Json(messages))
}

/// POST /api/messages
pub async fn send_message(
    State(state): State<MessagingAppState>,
    RequireAuth(user): RequireAuth,
    Json(message): Json<NewMessage>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .send_message_handler()
        .handle(SendMessageCommand {
            sender_id: user.id,
            message,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
