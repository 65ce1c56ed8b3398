//! Axum router configuration for document endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_document, delete_document, get_document, list_property_documents, list_signatures,
    list_templates, list_user_documents, sign_document, update_document, DocumentsAppState,
};

/// Create the documents API router. Every route requires authentication.
pub fn documents_router() -> Router<DocumentsAppState> {
    Router::new()
        .route("/api/properties/:id/documents", get(list_property_documents))
        .route("/api/user/documents", get(list_user_documents))
        .route("/api/documents", post(create_document))
        .route("/api/documents/templates", get(list_templates))
        .route(
            "/api/documents/:id",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/api/documents/:id/signatures", get(list_signatures))
        .route("/api/documents/:id/sign", post(sign_document))
}
