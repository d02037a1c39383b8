use std::collections::HashMap;

use docvault_core::{OwnerKind, VaultError};
use serde::Serialize;
use sqlx::{Sqlite, SqlitePool};

/// Per-kind storage totals for the stats report
#[derive(Debug, Clone, Serialize)]
pub struct KindStats {
    pub kind: OwnerKind,
    pub documents: i64,
    pub folders: i64,
    pub total_bytes: i64,
}

/// Read-only aggregates over the documents and folders tables
#[derive(Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Collect totals per owner kind, skipping kinds with no rows at all
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn collect(&self) -> Result<Vec<KindStats>, VaultError> {
        let document_rows = sqlx::query_as::<Sqlite, (OwnerKind, i64, i64)>(
            "SELECT documentable_type, COUNT(*), COALESCE(SUM(size), 0) \
             FROM documents GROUP BY documentable_type",
        )
        .fetch_all(&self.pool)
        .await?;

        let folder_rows = sqlx::query_as::<Sqlite, (OwnerKind, i64)>(
            "SELECT folderable_type, COUNT(*) FROM folders GROUP BY folderable_type",
        )
        .fetch_all(&self.pool)
        .await?;

        let doc_totals: HashMap<OwnerKind, (i64, i64)> = document_rows
            .into_iter()
            .map(|(kind, count, bytes)| (kind, (count, bytes)))
            .collect();
        let folder_totals: HashMap<OwnerKind, i64> = folder_rows.into_iter().collect();

        let stats = OwnerKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let (documents, total_bytes) = doc_totals.get(&kind).copied().unwrap_or((0, 0));
                let folders = folder_totals.get(&kind).copied().unwrap_or(0);
                if documents == 0 && folders == 0 {
                    return None;
                }
                Some(KindStats {
                    kind,
                    documents,
                    folders,
                    total_bytes,
                })
            })
            .collect();

        Ok(stats)
    }

    /// Totals for a single kind, zeros when it has no rows
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn collect_for_kind(&self, kind: OwnerKind) -> Result<KindStats, VaultError> {
        let (documents, total_bytes) = sqlx::query_as::<Sqlite, (i64, i64)>(
            "SELECT COUNT(*), COALESCE(SUM(size), 0) FROM documents WHERE documentable_type = $1",
        )
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        let folders = sqlx::query_scalar::<Sqlite, i64>(
            "SELECT COUNT(*) FROM folders WHERE folderable_type = $1",
        )
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(KindStats {
            kind,
            documents,
            folders,
            total_bytes,
        })
    }
}
