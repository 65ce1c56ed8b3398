//! HTTP handlers for document endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::documents::{
    CreateDocumentCommand, CreateDocumentHandler, DeleteDocumentCommand, DeleteDocumentHandler,
    GetDocumentHandler, GetDocumentQuery, ListPropertyDocumentsHandler,
    ListPropertyDocumentsQuery, ListSignaturesHandler, ListSignaturesQuery, ListTemplatesHandler,
    ListUserDocumentsHandler, ListUserDocumentsQuery, SignDocumentCommand, SignDocumentHandler,
    UpdateDocumentCommand, UpdateDocumentHandler,
};
use crate::domain::document::{DocumentRole, DocumentUpdate, NewDocument, NewSignature, SignRequest};
use crate::domain::foundation::{DocumentId, PropertyId};
use crate::ports::DocumentRepository;

use super::dto::{client_ip, user_agent, UserDocumentsParams};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DocumentsAppState {
    pub documents: Arc<dyn DocumentRepository>,
}

impl DocumentsAppState {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub fn property_documents_handler(&self) -> ListPropertyDocumentsHandler {
        ListPropertyDocumentsHandler::new(self.documents.clone())
    }

    pub fn user_documents_handler(&self) -> ListUserDocumentsHandler {
        ListUserDocumentsHandler::new(self.documents.clone())
    }

    pub fn templates_handler(&self) -> ListTemplatesHandler {
        ListTemplatesHandler::new(self.documents.clone())
    }

    pub fn get_handler(&self) -> GetDocumentHandler {
        GetDocumentHandler::new(self.documents.clone())
    }

    pub fn signatures_handler(&self) -> ListSignaturesHandler {
        ListSignaturesHandler::new(self.documents.clone())
    }

    pub fn create_handler(&self) -> CreateDocumentHandler {
        CreateDocumentHandler::new(self.documents.clone())
    }

    pub fn update_handler(&self) -> UpdateDocumentHandler {
        UpdateDocumentHandler::new(self.documents.clone())
    }

    pub fn delete_handler(&self) -> DeleteDocumentHandler {
        DeleteDocumentHandler::new(self.documents.clone())
    }

    pub fn sign_handler(&self) -> SignDocumentHandler {
        SignDocumentHandler::new(self.documents.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Queries
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/properties/:id/documents
pub async fn list_property_documents(
    State(state): State<DocumentsAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let property_id: PropertyId = id.parse()?;
    let documents = state
        .property_documents_handler()
        .handle(ListPropertyDocumentsQuery { property_id })
        .await?;
    Ok(Json(documents))
}

/// GET /api/user/documents
pub async fn list_user_documents(
    State(state): State<DocumentsAppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<UserDocumentsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let role = match params.role.as_deref() {
        None | Some("") => DocumentRole::default(),
        Some(role) => DocumentRole::parse(role)
            .ok_or_else(|| ApiError::bad_request("Ruolo non valido"))?,
    };
    let documents = state
        .user_documents_handler()
        .handle(ListUserDocumentsQuery {
            user_id: user.id,
            role,
        })
        .await?;
    Ok(Json(documents))
}

/// GET /api/documents/templates
pub async fn list_templates(
    State(state): State<DocumentsAppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let templates = state.templates_handler().handle().await?;
    Ok(Json(templates))
}

/// GET /api/documents/:id
pub async fn get_document(
    State(state): State<DocumentsAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document_id: DocumentId = id.parse()?;
    let document = state
        .get_handler()
        .handle(GetDocumentQuery { document_id })
        .await?;
    Ok(Json(document))
}

/// GET /api/documents/:id/signatures
pub async fn list_signatures(
    State(state): State<DocumentsAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document_id: DocumentId = id.parse()?;
    let signatures = state
        .signatures_handler()
        .handle(ListSignaturesQuery { document_id })
        .await?;
    Ok(Json(signatures))
}

// ════════════════════════════════════════════════════════════════════════════════
// Commands
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/documents
pub async fn create_document(
    State(state): State<DocumentsAppState>,
    RequireAuth(user): RequireAuth,
    Json(document): Json<NewDocument>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state
        .create_handler()
        .handle(CreateDocumentCommand {
            uploader_id: user.id,
            document,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// PUT /api/documents/:id
pub async fn update_document(
    State(state): State<DocumentsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(update): Json<DocumentUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let document_id: DocumentId = id.parse()?;
    let document = state
        .update_handler()
        .handle(UpdateDocumentCommand {
            user_id: user.id,
            document_id,
            update,
        })
        .await?;
    Ok(Json(document))
}

/// DELETE /api/documents/:id
pub async fn delete_document(
    State(state): State<DocumentsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document_id: DocumentId = id.parse()?;
    state
        .delete_handler()
        .handle(DeleteDocumentCommand {
            user_id: user.id,
            document_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/documents/:id/sign
pub async fn sign_document(
    State(state): State<DocumentsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(req): Json<SignRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let document_id: DocumentId = id.parse()?;
    let signature = NewSignature {
        signature_url: req.signature_url,
        ip_address: client_ip(&headers, connect_info.as_ref()),
        user_agent: user_agent(&headers),
    };
    let signature = state
        .sign_handler()
        .handle(SignDocumentCommand {
            user_id: user.id,
            document_id,
            signature,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(signature)))
}
