//! Axum router configuration for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_conversation, list_chats, send_message, MessagingAppState};

/// Create the messaging API router. Every route requires authentication.
pub fn messaging_router() -> Router<MessagingAppState> {
    Router::new()
        .route("/api/chats", get(list_chats))
        .route("/api/messages", post(send_message))
        .route("/api/messages/:property_id/:user_id", get(get_conversation))
}

#[cfg(test)]
mod tests {
    use crate::adapters::http::test_support::TestApp;
    use crate::domain::foundation::{PropertyId, Timestamp, UserId};
    use crate::domain::listing::property::sample_new_property;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn setup() -> (TestApp, String, String) {
        let app = TestApp::new();
        let owner = app.user(1).await;
        let tenant = app.user(2).await;
        let property = sample_new_property().into_property(
            PropertyId::from_raw(10),
            UserId::from_raw(1),
            Timestamp::now(),
        );
        app.store.insert_property(property).await;
        (app, owner, tenant)
    }

    #[tokio::test]
    async fn conversation_flow_tracks_unread_messages() {
        let (app, owner, tenant) = setup().await;

        let (status, sent) = app
            .post(
                "/api/messages",
                Some(&tenant),
                json!({ "propertyId": 10, "receiverId": 1, "content": "È ancora disponibile?" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(sent["isRead"], false);

        let (_, chats) = app.get("/api/chats", Some(&owner)).await;
        let chats = chats.as_array().unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0]["userId"], 2);
        assert_eq!(chats[0]["propertyTitle"], "Stanza luminosa");
        assert_eq!(chats[0]["unreadCount"], 1);

        let (status, messages) = app.get("/api/messages/10/2", Some(&owner)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(messages.as_array().unwrap().len(), 1);

        let (_, chats) = app.get("/api/chats", Some(&owner)).await;
        assert_eq!(chats[0]["unreadCount"], 0);
    }

    #[tokio::test]
    async fn sending_to_yourself_is_rejected() {
        let (app, owner, _) = setup().await;
        let (status, _) = app
            .post(
                "/api/messages",
                Some(&owner),
                json!({ "propertyId": 10, "receiverId": 1, "content": "ciao" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_property_is_404() {
        let (app, _, tenant) = setup().await;
        let (status, _) = app
            .post(
                "/api/messages",
                Some(&tenant),
                json!({ "propertyId": 99, "receiverId": 1, "content": "ciao" }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_ids_are_400() {
        let (app, owner, _) = setup().await;
        let (status, _) = app.get("/api/messages/x/2", Some(&owner)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
