//! Test helpers: build the full service stack on a temp database and disk.
//!
//! Run from the workspace root: `cargo test -p docvault-services`.
#![allow(dead_code)]

use std::sync::Arc;

use docvault_core::{DocumentOwner, OwnerKind, VaultConfig};
use docvault_db::{setup_database, DocumentRepository, FolderRepository};
use docvault_services::{DocumentStore, FolderManager, UploadRequest};
use docvault_storage::{Disk, LocalDisk};
use tempfile::TempDir;

/// Test application: services plus the temp resources they live on.
pub struct TestApp {
    pub store: DocumentStore,
    pub folders: FolderManager,
    pub documents_repo: DocumentRepository,
    pub folders_repo: FolderRepository,
    pub disk: Arc<dyn Disk>,
    pub _temp_dir: TempDir,
}

/// Setup the service stack against a fresh SQLite file and storage dir.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(&temp_dir);

    let pool = setup_database(&config)
        .await
        .expect("Failed to set up test database");

    let disk: Arc<dyn Disk> = Arc::new(
        LocalDisk::new(&config.storage_root)
            .await
            .expect("Failed to create local disk"),
    );

    let documents_repo = DocumentRepository::new(pool.clone());
    let folders_repo = FolderRepository::new(pool.clone());

    let store = DocumentStore::new(
        documents_repo.clone(),
        folders_repo.clone(),
        disk.clone(),
        config.upload_policy(),
    );
    let folders = FolderManager::new(folders_repo.clone(), disk.clone());

    TestApp {
        store,
        folders,
        documents_repo,
        folders_repo,
        disk,
        _temp_dir: temp_dir,
    }
}

fn test_config(temp_dir: &TempDir) -> VaultConfig {
    VaultConfig {
        database_url: format!("sqlite://{}/docvault.db", temp_dir.path().display()),
        storage_root: temp_dir.path().join("storage").display().to_string(),
        db_max_connections: 5,
        max_file_size: 1024 * 1024,
        allowed_extensions: vec![
            "pdf".into(),
            "doc".into(),
            "docx".into(),
            "jpg".into(),
            "jpeg".into(),
            "png".into(),
            "txt".into(),
        ],
        allowed_mime_types: vec![
            "application/pdf".into(),
            "application/msword".into(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".into(),
            "image/jpeg".into(),
            "image/png".into(),
            "text/plain".into(),
        ],
    }
}

/// A fresh property owner with its own storage UUID.
pub fn property_owner(id: i64) -> DocumentOwner {
    DocumentOwner::with_new_uuid(OwnerKind::Property, id)
}

/// A small PDF upload; the vault never inspects file contents, only size,
/// extension, and MIME type.
pub fn pdf_request(folder_id: Option<i64>) -> UploadRequest {
    UploadRequest {
        data: b"%PDF-1.4 test payload".to_vec(),
        original_filename: "contratto firmato.pdf".to_string(),
        extension: "pdf".to_string(),
        content_type: "application/pdf".to_string(),
        folder_id,
    }
}
