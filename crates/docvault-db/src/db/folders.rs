use chrono::Utc;
use docvault_core::{Folder, OwnerRef, VaultError};
use sqlx::{Sqlite, SqlitePool};

/// Repository for folder tree records
#[derive(Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a folder with its materialized path already computed
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "insert"))]
    pub async fn insert(
        &self,
        owner: OwnerRef,
        parent_folder_id: Option<i64>,
        name: &str,
        path: &str,
    ) -> Result<Folder, VaultError> {
        let created_at = Utc::now();
        let folder = sqlx::query_as::<Sqlite, Folder>(
            r#"
            INSERT INTO folders (folderable_type, folderable_id, parent_folder_id, name, path, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(owner.kind)
        .bind(owner.id)
        .bind(parent_folder_id)
        .bind(name)
        .bind(path)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(folder)
    }

    /// Get a folder by ID.
    ///
    /// Deliberately not owner-scoped, same contract as
    /// [`DocumentRepository::get_by_id`](crate::DocumentRepository::get_by_id).
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Folder>, VaultError> {
        let folder = sqlx::query_as::<Sqlite, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(folder)
    }

    /// List an owner's folders under one parent, `None` meaning the root level
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select"))]
    pub async fn list_for_owner(
        &self,
        owner: OwnerRef,
        parent_folder_id: Option<i64>,
    ) -> Result<Vec<Folder>, VaultError> {
        let folders = match parent_folder_id {
            Some(pid) => {
                sqlx::query_as::<Sqlite, Folder>(
                    "SELECT * FROM folders \
                     WHERE folderable_type = $1 AND folderable_id = $2 AND parent_folder_id = $3 \
                     ORDER BY name ASC",
                )
                .bind(owner.kind)
                .bind(owner.id)
                .bind(pid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<Sqlite, Folder>(
                    "SELECT * FROM folders \
                     WHERE folderable_type = $1 AND folderable_id = $2 AND parent_folder_id IS NULL \
                     ORDER BY name ASC",
                )
                .bind(owner.kind)
                .bind(owner.id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(folders)
    }

    /// Delete a folder row, returning whether a row was removed.
    ///
    /// Subfolders and document records go with it via `ON DELETE CASCADE`;
    /// callers are responsible for the files those records pointed at.
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: i64) -> Result<bool, VaultError> {
        let rows_affected = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Collect the owner-relative paths of every document in a folder's
    /// subtree, the folder itself included
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select", db.record_id = %folder_id))]
    pub async fn collect_subtree_document_paths(
        &self,
        folder_id: i64,
    ) -> Result<Vec<String>, VaultError> {
        let paths = sqlx::query_scalar::<Sqlite, String>(
            r#"
            WITH RECURSIVE folder_tree AS (
                SELECT id FROM folders WHERE id = $1
                UNION ALL
                SELECT f.id FROM folders f
                INNER JOIN folder_tree ft ON f.parent_folder_id = ft.id
            )
            SELECT d.path FROM documents d
            INNER JOIN folder_tree ft ON d.folder_id = ft.id
            ORDER BY d.path ASC
            "#,
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(paths)
    }
}
