use chrono::Utc;
use docvault_core::{Document, NewDocument, OwnerKind, OwnerRef, VaultError};
use sqlx::{Sqlite, SqlitePool};

/// Repository for document metadata records
#[derive(Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a document record and return it with its generated id
    #[tracing::instrument(skip(self, doc), fields(db.table = "documents", db.operation = "insert"))]
    pub async fn insert(&self, doc: &NewDocument) -> Result<Document, VaultError> {
        let created_at = Utc::now();
        let document = sqlx::query_as::<Sqlite, Document>(
            r#"
            INSERT INTO documents
                (documentable_type, documentable_id, folder_id, name, stored_name,
                 extension, mime_type, size, path, is_image, is_pdf, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(doc.documentable_type)
        .bind(doc.documentable_id)
        .bind(doc.folder_id)
        .bind(&doc.name)
        .bind(&doc.stored_name)
        .bind(&doc.extension)
        .bind(&doc.mime_type)
        .bind(doc.size)
        .bind(&doc.path)
        .bind(doc.is_image)
        .bind(doc.is_pdf)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    /// Get a document by ID.
    ///
    /// Deliberately not owner-scoped: callers fetch first, then check
    /// ownership, so a cross-owner ID is reported as denied rather than
    /// missing.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Document>, VaultError> {
        let document =
            sqlx::query_as::<Sqlite, Document>("SELECT * FROM documents WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(document)
    }

    /// List an owner's documents in one folder, `None` meaning the root level
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn list_for_owner(
        &self,
        owner: OwnerRef,
        folder_id: Option<i64>,
    ) -> Result<Vec<Document>, VaultError> {
        let documents = match folder_id {
            Some(fid) => {
                sqlx::query_as::<Sqlite, Document>(
                    "SELECT * FROM documents \
                     WHERE documentable_type = $1 AND documentable_id = $2 AND folder_id = $3 \
                     ORDER BY name ASC",
                )
                .bind(owner.kind)
                .bind(owner.id)
                .bind(fid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<Sqlite, Document>(
                    "SELECT * FROM documents \
                     WHERE documentable_type = $1 AND documentable_id = $2 AND folder_id IS NULL \
                     ORDER BY name ASC",
                )
                .bind(owner.kind)
                .bind(owner.id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(documents)
    }

    /// Delete a document record, returning whether a row was removed
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: i64) -> Result<bool, VaultError> {
        let rows_affected = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Check whether any record of the given kind has this owner-relative path
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn exists_with_path(&self, kind: OwnerKind, path: &str) -> Result<bool, VaultError> {
        let exists = sqlx::query_scalar::<Sqlite, bool>(
            "SELECT EXISTS(SELECT 1 FROM documents WHERE documentable_type = $1 AND path = $2)",
        )
        .bind(kind)
        .bind(path)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
