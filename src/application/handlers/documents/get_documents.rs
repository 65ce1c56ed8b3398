//! Document queries.

use std::sync::Arc;

use crate::domain::document::{Document, DocumentRole, Signature};
use crate::domain::foundation::{DocumentId, DomainError, PropertyId, UserId};
use crate::ports::DocumentRepository;

use super::require_document;

#[derive(Debug, Clone)]
pub struct ListPropertyDocumentsQuery {
    pub property_id: PropertyId,
}

pub struct ListPropertyDocumentsHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl ListPropertyDocumentsHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, query: ListPropertyDocumentsQuery) -> Result<Vec<Document>, DomainError> {
        self.documents.for_property(query.property_id).await
    }
}

#[derive(Debug, Clone)]
pub struct ListUserDocumentsQuery {
    pub user_id: UserId,
    pub role: DocumentRole,
}

/// Documents the caller uploaded, or with `Signer`, the ones they signed.
pub struct ListUserDocumentsHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl ListUserDocumentsHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, query: ListUserDocumentsQuery) -> Result<Vec<Document>, DomainError> {
        match query.role {
            DocumentRole::Uploader => self.documents.uploaded_by(query.user_id).await,
            DocumentRole::Signer => self.documents.signed_by(query.user_id).await,
        }
    }
}

pub struct ListTemplatesHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl ListTemplatesHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self) -> Result<Vec<Document>, DomainError> {
        self.documents.templates().await
    }
}

#[derive(Debug, Clone)]
pub struct GetDocumentQuery {
    pub document_id: DocumentId,
}

pub struct GetDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl GetDocumentHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, query: GetDocumentQuery) -> Result<Document, DomainError> {
        require_document(self.documents.as_ref(), query.document_id).await
    }
}

#[derive(Debug, Clone)]
pub struct ListSignaturesQuery {
    pub document_id: DocumentId,
}

/// Signatures of a document, oldest first. 404 for an unknown document.
pub struct ListSignaturesHandler {
    documents: Arc<dyn DocumentRepository>,
}

impl ListSignaturesHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    pub async fn handle(&self, query: ListSignaturesQuery) -> Result<Vec<Signature>, DomainError> {
        let document = require_document(self.documents.as_ref(), query.document_id).await?;
        self.documents.signatures(document.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::document::record::sample_new_document;
    use crate::domain::document::NewSignature;
    use crate::domain::foundation::{ErrorCode, Timestamp};

    #[tokio::test]
    async fn user_documents_follow_the_requested_role() {
        let store = Arc::new(InMemoryStore::new());
        let now = Timestamp::now();
        let mine = store
            .create(UserId::from_raw(1), sample_new_document(), now)
            .await
            .unwrap();
        let theirs = store
            .create(UserId::from_raw(2), sample_new_document(), now)
            .await
            .unwrap();
        store
            .add_signature(
                theirs.id,
                UserId::from_raw(1),
                NewSignature {
                    signature_url: "/firme/1.png".to_string(),
                    ip_address: None,
                    user_agent: None,
                },
                now,
            )
            .await
            .unwrap();

        let handler = ListUserDocumentsHandler::new(store);
        let uploaded = handler
            .handle(ListUserDocumentsQuery {
                user_id: UserId::from_raw(1),
                role: DocumentRole::Uploader,
            })
            .await
            .unwrap();
        assert_eq!(uploaded.iter().map(|d| d.id).collect::<Vec<_>>(), vec![mine.id]);

        let signed = handler
            .handle(ListUserDocumentsQuery {
                user_id: UserId::from_raw(1),
                role: DocumentRole::Signer,
            })
            .await
            .unwrap();
        assert_eq!(signed.iter().map(|d| d.id).collect::<Vec<_>>(), vec![theirs.id]);
    }

    #[tokio::test]
    async fn templates_are_listed_separately() {
        let store = Arc::new(InMemoryStore::new());
        let mut template = sample_new_document();
        template.is_template = true;
        template.property_id = None;
        store
            .create(UserId::from_raw(1), template, Timestamp::now())
            .await
            .unwrap();
        store
            .create(UserId::from_raw(1), sample_new_document(), Timestamp::now())
            .await
            .unwrap();

        let templates = ListTemplatesHandler::new(store).handle().await.unwrap();
        assert_eq!(templates.len(), 1);
        assert!(templates[0].is_template);
    }

    #[tokio::test]
    async fn signatures_of_unknown_document_are_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = ListSignaturesHandler::new(store)
            .handle(ListSignaturesQuery {
                document_id: DocumentId::from_raw(5),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
