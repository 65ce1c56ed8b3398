//! Documents attached to listings (contracts, agreements).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DocumentId, PropertyId, Timestamp, UserId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Contract,
    Agreement,
    #[default]
    Other,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Contract => "contract",
            DocumentCategory::Agreement => "agreement",
            DocumentCategory::Other => "other",
        }
    }

    /// Unknown categories are stored as `other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "contract" => DocumentCategory::Contract,
            "agreement" => DocumentCategory::Agreement,
            _ => DocumentCategory::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub property_id: Option<PropertyId>,
    pub uploader_id: UserId,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub file_url: String,
    pub description: Option<String>,
    pub category: DocumentCategory,
    pub is_template: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}

impl Document {
    pub fn is_uploaded_by(&self, user_id: UserId) -> bool {
        self.uploader_id == user_id
    }
}

/// Which side of a document the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentRole {
    #[default]
    Uploader,
    Signer,
}

impl DocumentRole {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "uploader" => Some(DocumentRole::Uploader),
            "signer" => Some(DocumentRole::Signer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    #[serde(default)]
    pub property_id: Option<PropertyId>,
    pub file_name: String,
    #[serde(default)]
    pub file_size: i64,
    pub file_type: String,
    pub file_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: DocumentCategory,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl NewDocument {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.file_name.trim().is_empty() {
            return Err(ValidationError::empty_field("fileName"));
        }
        if self.file_type.trim().is_empty() {
            return Err(ValidationError::empty_field("fileType"));
        }
        if self.file_url.trim().is_empty() {
            return Err(ValidationError::empty_field("fileUrl"));
        }
        if self.file_size < 0 {
            return Err(ValidationError::out_of_range("fileSize", 0, i64::MAX, self.file_size));
        }
        Ok(())
    }

    pub fn into_document(self, id: DocumentId, uploader: UserId, now: Timestamp) -> Document {
        Document {
            id,
            property_id: self.property_id,
            uploader_id: uploader,
            file_name: self.file_name,
            file_size: self.file_size,
            file_type: self.file_type,
            file_url: self.file_url,
            description: self.description,
            category: self.category,
            is_template: self.is_template,
            created_at: now,
            updated_at: now,
            expires_at: self.expires_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<DocumentCategory>,
    pub is_template: Option<bool>,
    pub expires_at: Option<Timestamp>,
}

impl DocumentUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(&self.file_name, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::empty_field("fileName"));
        }
        Ok(())
    }

    pub fn apply(self, document: &mut Document, now: Timestamp) {
        if let Some(file_name) = self.file_name {
            document.file_name = file_name;
        }
        if let Some(description) = self.description {
            document.description = Some(description);
        }
        if let Some(category) = self.category {
            document.category = category;
        }
        if let Some(is_template) = self.is_template {
            document.is_template = is_template;
        }
        if let Some(expires_at) = self.expires_at {
            document.expires_at = Some(expires_at);
        }
        document.updated_at = now;
    }
}

#[cfg(test)]
pub(crate) fn sample_new_document() -> NewDocument {
    NewDocument {
        property_id: Some(PropertyId::from_raw(1)),
        file_name: "contratto.pdf".into(),
        file_size: 2048,
        file_type: "application/pdf".into(),
        file_url: "/uploads/contratto.pdf".into(),
        description: None,
        category: DocumentCategory::Contract,
        is_template: false,
        expires_at: None,
    }
}
