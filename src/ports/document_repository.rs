//! Document repository port.

use async_trait::async_trait;

use crate::domain::document::{Document, NewDocument, NewSignature, Signature};
use crate::domain::foundation::{DocumentId, DomainError, PropertyId, Timestamp, UserId};

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, DomainError>;

    async fn for_property(&self, property_id: PropertyId) -> Result<Vec<Document>, DomainError>;

    async fn uploaded_by(&self, user_id: UserId) -> Result<Vec<Document>, DomainError>;

    /// Documents the user has signed.
    async fn signed_by(&self, user_id: UserId) -> Result<Vec<Document>, DomainError>;

    async fn templates(&self) -> Result<Vec<Document>, DomainError>;

    async fn create(
        &self,
        uploader: UserId,
        document: NewDocument,
        now: Timestamp,
    ) -> Result<Document, DomainError>;

    async fn update(&self, document: &Document) -> Result<(), DomainError>;

    /// Removes the document and its signatures.
    async fn delete(&self, id: DocumentId) -> Result<bool, DomainError>;

    async fn signatures(&self, document_id: DocumentId) -> Result<Vec<Signature>, DomainError>;

    async fn find_signature(
        &self,
        document_id: DocumentId,
        user_id: UserId,
    ) -> Result<Option<Signature>, DomainError>;

    async fn add_signature(
        &self,
        document_id: DocumentId,
        signer: UserId,
        signature: NewSignature,
        now: Timestamp,
    ) -> Result<Signature, DomainError>;
}
