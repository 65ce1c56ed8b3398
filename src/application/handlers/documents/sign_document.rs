//! SignDocumentHandler - Command handler for signing a document.

use std::sync::Arc;

use crate::domain::document::{NewSignature, Signature};
use crate::domain::foundation::{DocumentId, DomainError, Timestamp, UserId};
use crate::ports::DocumentRepository;

use super::require_document;

#[derive(Debug, Clone)]
pub struct SignDocumentCommand {
    pub user_id: UserId,
    pub document_id: DocumentId,
    pub signature: NewSignature,
}

/// Records one signature per user per document, with the request origin.
pub struct SignDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl SignDocumentHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, cmd: SignDocumentCommand) -> Result<Signature, DomainError> {
        // 1. Validate
        cmd.signature.validate()?;

        // 2. Document must exist and not be signed by this user yet
        let document = require_document(self.documents.as_ref(), cmd.document_id).await?;
        if self
            .documents
            .find_signature(document.id, cmd.user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::validation(
                "documentId",
                "Hai già firmato questo documento",
            ));
        }

        // 3. Record
        let signature = self
            .documents
            .add_signature(document.id, cmd.user_id, cmd.signature, Timestamp::now())
            .await?;

        tracing::info!(
            document_id = %document.id,
            signer_id = %cmd.user_id,
            signature_id = %signature.id,
            "Document signed"
        );
        Ok(signature)
    }
}
