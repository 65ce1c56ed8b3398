use async_trait::async_trait;

use crate::domain::document::{Document, NewDocument, NewSignature, Signature};
use crate::domain::foundation::{DocumentId, DomainError, PropertyId, SignatureId, Timestamp, UserId};
use crate::ports::DocumentRepository;

use super::InMemoryStore;

impl InMemoryStore {
    async fn documents_where<F>(&self, predicate: F) -> Vec<Document>
    where
        F: Fn(&Document) -> bool,
    {
        let state = self.state.read().await;
        let mut documents: Vec<Document> = state
            .documents
            .values()
            .filter(|d| predicate(d))
            .cloned()
            .collect();
        documents.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        documents
    }
}

#[async_trait]
impl DocumentRepository for InMemoryStore {
    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, DomainError> {
        Ok(self.state.read().await.documents.get(&id).cloned())
    }

    async fn for_property(&self, property_id: PropertyId) -> Result<Vec<Document>, DomainError> {
        Ok(self
            .documents_where(|d| d.property_id == Some(property_id))
            .await)
    }

    async fn uploaded_by(&self, user_id: UserId) -> Result<Vec<Document>, DomainError> {
        Ok(self.documents_where(|d| d.uploader_id == user_id).await)
    }

    async fn signed_by(&self, user_id: UserId) -> Result<Vec<Document>, DomainError> {
        let signed: Vec<DocumentId> = {
            let state = self.state.read().await;
            state
                .signatures
                .iter()
                .filter(|s| s.user_id == user_id)
                .map(|s| s.document_id)
                .collect()
        };
        Ok(self.documents_where(|d| signed.contains(&d.id)).await)
    }

    async fn templates(&self) -> Result<Vec<Document>, DomainError> {
        Ok(self.documents_where(|d| d.is_template).await)
    }

    async fn create(
        &self,
        uploader: UserId,
        document: NewDocument,
        now: Timestamp,
    ) -> Result<Document, DomainError> {
        let mut state = self.state.write().await;
        let id = DocumentId::from_raw(state.next_id());
        let document = document.into_document(id, uploader, now);
        state.documents.insert(id, document.clone());
        Ok(document)
    }

    async fn update(&self, document: &Document) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.documents.get_mut(&document.id) {
            Some(stored) => {
                *stored = document.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Document not found")),
        }
    }

    async fn delete(&self, id: DocumentId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if state.documents.remove(&id).is_none() {
            return Ok(false);
        }
        state.signatures.retain(|s| s.document_id != id);
        Ok(true)
    }

    async fn signatures(&self, document_id: DocumentId) -> Result<Vec<Signature>, DomainError> {
        let state = self.state.read().await;
        let mut signatures: Vec<Signature> = state
            .signatures
            .iter()
            .filter(|s| s.document_id == document_id)
            .cloned()
            .collect();
        signatures.sort_by_key(|s| (s.signed_at, s.id));
        Ok(signatures)
    }

    async fn find_signature(
        &self,
        document_id: DocumentId,
        user_id: UserId,
    ) -> Result<Option<Signature>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .signatures
            .iter()
            .find(|s| s.document_id == document_id && s.user_id == user_id)
            .cloned())
    }

    async fn add_signature(
        &self,
        document_id: DocumentId,
        signer: UserId,
        signature: NewSignature,
        now: Timestamp,
    ) -> Result<Signature, DomainError> {
        let mut state = self.state.write().await;
        if state
            .signatures
            .iter()
            .any(|s| s.document_id == document_id && s.user_id == signer)
        {
            return Err(DomainError::conflict("Document already signed"));
        }
        let id = SignatureId::from_raw(state.next_id());
        let signature = signature.into_signature(id, document_id, signer, now);
        state.signatures.push(signature.clone());
        Ok(signature)
    }
}
