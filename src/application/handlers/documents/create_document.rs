//! CreateDocumentHandler - Command handler for registering an uploaded file.

use std::sync::Arc;

use crate::domain::document::{Document, NewDocument};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::DocumentRepository;

#[derive(Debug, Clone)]
pub struct CreateDocumentCommand {
    pub uploader_id: UserId,
    pub document: NewDocument,
}

/// Stores document metadata. The file itself is already hosted at `file_url`.
pub struct CreateDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl CreateDocumentHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, cmd: CreateDocumentCommand) -> Result<Document, DomainError> {
        cmd.document.validate()?;
        let document = self
            .documents
            .create(cmd.uploader_id, cmd.document, Timestamp::now())
            .await?;

        tracing::info!(
            document_id = %document.id,
            uploader_id = %document.uploader_id,
            category = document.category.as_str(),
            "Document created"
        );
        Ok(document)
    }
}
