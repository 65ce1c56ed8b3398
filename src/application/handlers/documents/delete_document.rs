//! DeleteDocumentHandler - Command handler for removing a document.

use std::sync::Arc;

use crate::domain::foundation::{DocumentId, DomainError, UserId};
use crate::ports::DocumentRepository;

use super::require_document;

#[derive(Debug, Clone)]
pub struct DeleteDocumentCommand {
    pub user_id: UserId,
    pub document_id: DocumentId,
}

/// Uploader-only delete; signatures go with the document.
pub struct DeleteDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl DeleteDocumentHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, cmd: DeleteDocumentCommand) -> Result<(), DomainError> {
        let document = require_document(self.documents.as_ref(), cmd.document_id).await?;
        if !document.is_uploaded_by(cmd.user_id) {
            return Err(DomainError::forbidden(
                "Accesso negato. Non sei il proprietario di questo documento.",
            ));
        }

        if !self.documents.delete(document.id).await? {
            return Err(DomainError::not_found("Documento non trovato"));
        }
        tracing::info!(document_id = %document.id, "Document deleted");
        Ok(())
    }
}
