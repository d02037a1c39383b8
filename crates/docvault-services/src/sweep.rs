//! Orphaned file sweeper
//!
//! Walks the disk and reconciles it against document records. Disk writes
//! happen before record inserts, so a crash between the two leaves a file
//! with no record; the sweeper finds and, when asked, removes such files.

use std::sync::Arc;

use chrono::{Duration, Utc};
use docvault_core::{VaultError, VaultResult};
use docvault_db::DocumentRepository;
use docvault_storage::{keys, Disk};
use serde::Serialize;

/// Whether the sweeper only reports orphans or also deletes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    DryRun,
    Apply,
}

/// Outcome of one sweep run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    pub scanned: usize,
    pub skipped_recent: usize,
    pub orphans: Vec<String>,
    pub removed: usize,
}

pub struct OrphanSweeper {
    documents: DocumentRepository,
    disk: Arc<dyn Disk>,
    min_age: Duration,
    mode: SweepMode,
}

impl OrphanSweeper {
    pub fn new(
        documents: DocumentRepository,
        disk: Arc<dyn Disk>,
        min_age: Duration,
        mode: SweepMode,
    ) -> Self {
        Self {
            documents,
            disk,
            min_age,
            mode,
        }
    }

    /// Walk the whole disk once and reconcile it against the records.
    ///
    /// Files younger than `min_age` are skipped: they may belong to an
    /// upload whose record insert has not landed yet. Files whose key does
    /// not follow the document layout are never touched, and a failed record
    /// lookup skips the file rather than risking a false orphan.
    #[tracing::instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn run(&self) -> VaultResult<SweepReport> {
        let entries = self.disk.list("").await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list disk contents");
            VaultError::Disk(format!("Failed to list disk: {}", e))
        })?;

        let now = Utc::now();
        let mut report = SweepReport::default();

        for entry in entries {
            report.scanned += 1;

            let parsed = match keys::parse_document_key(&entry.key) {
                Some(parsed) => parsed,
                None => {
                    tracing::debug!(key = %entry.key, "Skipping file outside the document layout");
                    continue;
                }
            };

            // A missing mtime counts as recent; never delete what cannot be aged.
            let old_enough = entry
                .modified
                .map(|m| now.signed_duration_since(m) >= self.min_age)
                .unwrap_or(false);
            if !old_enough {
                report.skipped_recent += 1;
                continue;
            }

            match self
                .documents
                .exists_with_path(parsed.kind, &parsed.relative_path)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!(key = %entry.key, size_bytes = entry.size, "Found orphaned file");
                    report.orphans.push(entry.key.clone());
                    if self.mode == SweepMode::Apply {
                        match self.disk.delete(&entry.key).await {
                            Ok(()) => {
                                report.removed += 1;
                                tracing::info!(key = %entry.key, "Removed orphaned file");
                            }
                            Err(e) => {
                                tracing::error!(error = %e, key = %entry.key, "Failed to remove orphaned file");
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        error_type = e.error_type(),
                        key = %entry.key,
                        "Orphan check failed, skipping file"
                    );
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            skipped_recent = report.skipped_recent,
            orphans = report.orphans.len(),
            removed = report.removed,
            "Sweep completed"
        );

        Ok(report)
    }
}
