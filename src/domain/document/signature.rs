//! Electronic signatures on documents.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DocumentId, SignatureId, Timestamp, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub id: SignatureId,
    pub document_id: DocumentId,
    pub user_id: UserId,
    pub signature_url: String,
    pub signed_at: Timestamp,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Signature request together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSignature {
    pub signature_url: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl NewSignature {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.signature_url.trim().is_empty() {
            return Err(ValidationError::empty_field("signatureUrl"));
        }
        Ok(())
    }

    pub fn into_signature(self, id: SignatureId, document_id: DocumentId, signer: UserId, now: Timestamp) -> Signature {
        Signature {
            id,
            document_id,
            user_id: signer,
            signature_url: self.signature_url,
            signed_at: now,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    pub signature_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_keeps_request_origin() {
        let signature = NewSignature {
            signature_url: "/sig.png".into(),
            ip_address: Some("10.0.0.1".into()),
            user_agent: Some("curl/8".into()),
        }
        .into_signature(SignatureId::from_raw(1), DocumentId::from_raw(2), UserId::from_raw(3), Timestamp::now());
        assert_eq!(signature.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(signature.document_id, DocumentId::from_raw(2));
    }

    #[test]
    fn empty_signature_url_is_rejected() {
        let new = NewSignature {
            signature_url: "".into(),
            ip_address: None,
            user_agent: None,
        };
        assert!(new.validate().is_err());
    }
}
