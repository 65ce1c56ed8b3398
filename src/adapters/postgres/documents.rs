//! PostgreSQL implementation of DocumentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::document::{Document, DocumentCategory, NewDocument, NewSignature, Signature};
use crate::domain::foundation::{DocumentId, DomainError, PropertyId, SignatureId, Timestamp, UserId};
use crate::ports::DocumentRepository;

use super::{db_error, opt_dt, opt_ts, ts, violates};

const DOCUMENT_COLUMNS: &str = "d.id, d.property_id, d.uploader_id, d.file_name, d.file_size, \
     d.file_type, d.file_url, d.description, d.category, d.is_template, d.created_at, \
     d.updated_at, d.expires_at";

const SIGNATURE_COLUMNS: &str =
    "id, document_id, user_id, signature_url, signed_at, ip_address, user_agent";

pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs a document query bound to one integer parameter.
    async fn documents(&self, sql: &str, param: Option<i32>) -> Result<Vec<Document>, DomainError> {
        let mut query = sqlx::query_as::<_, DocumentRow>(sql);
        if let Some(param) = param {
            query = query.bind(param);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list documents"))?;
        Ok(rows.into_iter().map(Document::from).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: i32,
    property_id: Option<i32>,
    uploader_id: i32,
    file_name: String,
    file_size: i64,
    file_type: String,
    file_url: String,
    description: Option<String>,
    category: String,
    is_template: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: DocumentId::from_raw(row.id),
            property_id: row.property_id.map(PropertyId::from_raw),
            uploader_id: UserId::from_raw(row.uploader_id),
            file_name: row.file_name,
            file_size: row.file_size,
            file_type: row.file_type,
            file_url: row.file_url,
            description: row.description,
            category: DocumentCategory::parse(&row.category),
            is_template: row.is_template,
            created_at: ts(row.created_at),
            updated_at: ts(row.updated_at),
            expires_at: opt_ts(row.expires_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SignatureRow {
    id: i32,
    document_id: i32,
    user_id: i32,
    signature_url: String,
    signed_at: DateTime<Utc>,
    ip_address: Option<String>,
    user_agent: Option<String>,
}

impl From<SignatureRow> for Signature {
    fn from(row: SignatureRow) -> Self {
        Signature {
            id: SignatureId::from_raw(row.id),
            document_id: DocumentId::from_raw(row.document_id),
            user_id: UserId::from_raw(row.user_id),
            signature_url: row.signature_url,
            signed_at: ts(row.signed_at),
            ip_address: row.ip_address,
            user_agent: row.user_agent,
        }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, DomainError> {
        let sql = format!("SELECT {} FROM documents d WHERE d.id = $1", DOCUMENT_COLUMNS);
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find document"))?;
        Ok(row.map(Document::from))
    }

    async fn for_property(&self, property_id: PropertyId) -> Result<Vec<Document>, DomainError> {
        let sql = format!(
            "SELECT {} FROM documents d WHERE d.property_id = $1 \
             ORDER BY d.created_at DESC, d.id DESC",
            DOCUMENT_COLUMNS
        );
        self.documents(&sql, Some(property_id.as_i32())).await
    }

    async fn uploaded_by(&self, user_id: UserId) -> Result<Vec<Document>, DomainError> {
        let sql = format!(
            "SELECT {} FROM documents d WHERE d.uploader_id = $1 \
             ORDER BY d.created_at DESC, d.id DESC",
            DOCUMENT_COLUMNS
        );
        self.documents(&sql, Some(user_id.as_i32())).await
    }

    async fn signed_by(&self, user_id: UserId) -> Result<Vec<Document>, DomainError> {
        let sql = format!(
            "SELECT {} FROM documents d \
             JOIN signatures s ON s.document_id = d.id \
             WHERE s.user_id = $1 \
             ORDER BY d.created_at DESC, d.id DESC",
            DOCUMENT_COLUMNS
        );
        self.documents(&sql, Some(user_id.as_i32())).await
    }

    async fn templates(&self) -> Result<Vec<Document>, DomainError> {
        let sql = format!(
            "SELECT {} FROM documents d WHERE d.is_template ORDER BY d.created_at DESC, d.id DESC",
            DOCUMENT_COLUMNS
        );
        self.documents(&sql, None).await
    }

    async fn create(
        &self,
        uploader: UserId,
        document: NewDocument,
        now: Timestamp,
    ) -> Result<Document, DomainError> {
        let doc = document.into_document(DocumentId::from_raw(0), uploader, now);
        let row: DocumentRow = sqlx::query_as(
            r#"
            INSERT INTO documents AS d (
                property_id, uploader_id, file_name, file_size, file_type, file_url,
                description, category, is_template, created_at, updated_at, expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10, $11)
            RETURNING d.id, d.property_id, d.uploader_id, d.file_name, d.file_size,
                d.file_type, d.file_url, d.description, d.category, d.is_template,
                d.created_at, d.updated_at, d.expires_at
            "#,
        )
        .bind(doc.property_id.map(|p| p.as_i32()))
        .bind(doc.uploader_id.as_i32())
        .bind(&doc.file_name)
        .bind(doc.file_size)
        .bind(&doc.file_type)
        .bind(&doc.file_url)
        .bind(&doc.description)
        .bind(doc.category.as_str())
        .bind(doc.is_template)
        .bind(doc.created_at.as_datetime())
        .bind(opt_dt(doc.expires_at))
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create document"))?;

        Ok(row.into())
    }

    async fn update(&self, document: &Document) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE documents SET
                file_name = $2, description = $3, category = $4,
                is_template = $5, expires_at = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(document.id.as_i32())
        .bind(&document.file_name)
        .bind(&document.description)
        .bind(document.category.as_str())
        .bind(document.is_template)
        .bind(opt_dt(document.expires_at))
        .bind(document.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update document"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Document not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: DocumentId) -> Result<bool, DomainError> {
        // Signatures go with the document (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete document"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn signatures(&self, document_id: DocumentId) -> Result<Vec<Signature>, DomainError> {
        let sql = format!(
            "SELECT {} FROM signatures WHERE document_id = $1 ORDER BY signed_at ASC, id ASC",
            SIGNATURE_COLUMNS
        );
        let rows: Vec<SignatureRow> = sqlx::query_as(&sql)
            .bind(document_id.as_i32())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list signatures"))?;
        Ok(rows.into_iter().map(Signature::from).collect())
    }

    async fn find_signature(
        &self,
        document_id: DocumentId,
        user_id: UserId,
    ) -> Result<Option<Signature>, DomainError> {
        let sql = format!(
            "SELECT {} FROM signatures WHERE document_id = $1 AND user_id = $2",
            SIGNATURE_COLUMNS
        );
        let row: Option<SignatureRow> = sqlx::query_as(&sql)
            .bind(document_id.as_i32())
            .bind(user_id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find signature"))?;
        Ok(row.map(Signature::from))
    }

    async fn add_signature(
        &self,
        document_id: DocumentId,
        signer: UserId,
        signature: NewSignature,
        now: Timestamp,
    ) -> Result<Signature, DomainError> {
        let sql = format!(
            "INSERT INTO signatures (document_id, user_id, signature_url, signed_at, ip_address, \
             user_agent) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            SIGNATURE_COLUMNS
        );
        let row: SignatureRow = sqlx::query_as(&sql)
            .bind(document_id.as_i32())
            .bind(signer.as_i32())
            .bind(&signature.signature_url)
            .bind(now.as_datetime())
            .bind(&signature.ip_address)
            .bind(&signature.user_agent)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if violates(&e, "signatures_document_user_key") {
                    return DomainError::conflict("Document already signed");
                }
                db_error("sign document")(e)
            })?;
        Ok(row.into())
    }
}
