//! UpdateDocumentHandler - Command handler for editing document metadata.

use std::sync::Arc;

use crate::domain::document::{Document, DocumentUpdate};
use crate::domain::foundation::{DocumentId, DomainError, Timestamp, UserId};
use crate::ports::DocumentRepository;

use super::require_document;

#[derive(Debug, Clone)]
pub struct UpdateDocumentCommand {
    pub user_id: UserId,
    pub document_id: DocumentId,
    pub update: DocumentUpdate,
}

pub struct UpdateDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl UpdateDocumentHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, cmd: UpdateDocumentCommand) -> Result<Document, DomainError> {
        let mut document = require_document(self.documents.as_ref(), cmd.document_id).await?;
        if !document.is_uploaded_by(cmd.user_id) {
            return Err(DomainError::forbidden(
                "Accesso negato. Non sei il proprietario di questo documento.",
            ));
        }

        cmd.update.validate()?;
        cmd.update.apply(&mut document, Timestamp::now());
        self.documents.update(&document).await?;
        Ok(document)
    }
}
