//! Document handlers.
//!
//! ## Commands
//! - Uploading document metadata
//! - Updating and deleting a document (uploader only)
//! - Signing a document
//!
//! ## Queries
//! - Documents of a listing, of the caller (by role), templates
//! - A single document and its signatures

mod create_document;
mod delete_document;
mod get_documents;
mod sign_document;
mod update_document;

use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, DomainError};
use crate::ports::DocumentRepository;

// Commands
pub use create_document::{CreateDocumentCommand, CreateDocumentHandler};
pub use delete_document::{DeleteDocumentCommand, DeleteDocumentHandler};
pub use sign_document::{SignDocumentCommand, SignDocumentHandler};
pub use update_document::{UpdateDocumentCommand, UpdateDocumentHandler};

// Queries
pub use get_documents::{
    GetDocumentHandler, GetDocumentQuery, ListPropertyDocumentsHandler,
    ListPropertyDocumentsQuery, ListSignaturesHandler, ListSignaturesQuery,
    ListTemplatesHandler, ListUserDocumentsHandler, ListUserDocumentsQuery,
};

pub(crate) async fn require_document(
    documents: &dyn DocumentRepository,
    id: DocumentId,
) -> Result<Document, DomainError> {
    documents
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Documento non trovato"))
}
