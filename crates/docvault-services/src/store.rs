//! Document storage service
//!
//! Orchestrates the upload pipeline and every per-document operation:
//! validate → resolve folder → store on disk → persist metadata, with
//! ownership enforced on each access by ID.

use std::sync::Arc;

use docvault_core::{
    assert_owned_by, Document, DocumentOwner, NewDocument, OwnerRef, TypeFlags, UploadPolicy,
    VaultError, VaultResult,
};
use docvault_db::{DocumentRepository, FolderRepository};
use docvault_storage::{keys, Disk, DiskError};
use uuid::Uuid;

/// One file handed to [`DocumentStore::upload`].
///
/// The extension and MIME type are declared by the caller rather than parsed
/// out of the original filename; the original filename is kept for display
/// only and never appears on disk.
#[derive(Clone)]
pub struct UploadRequest {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub extension: String,
    pub content_type: String,
    pub folder_id: Option<i64>,
}

/// A document's bytes together with the metadata needed to serve them.
#[derive(Debug, Clone)]
pub struct DocumentContents {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub original_filename: String,
}

/// Document storage service: uploads, reads, listing, deletion
#[derive(Clone)]
pub struct DocumentStore {
    documents: DocumentRepository,
    folders: FolderRepository,
    disk: Arc<dyn Disk>,
    policy: UploadPolicy,
}

impl DocumentStore {
    pub fn new(
        documents: DocumentRepository,
        folders: FolderRepository,
        disk: Arc<dyn Disk>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            documents,
            folders,
            disk,
            policy,
        }
    }

    /// Complete upload workflow: validate → resolve folder → store → persist
    #[tracing::instrument(skip(self, owner, request), fields(owner = %owner.owner_ref()))]
    pub async fn upload(
        &self,
        owner: &DocumentOwner,
        request: UploadRequest,
    ) -> VaultResult<Document> {
        // 1. Validate size, extension, and MIME type
        let size = request.data.len();
        let (extension, mime_type) =
            self.policy
                .validate_upload(&request.extension, &request.content_type, size)?;

        // 2. Resolve the target folder and check it belongs to this owner
        let folder = match request.folder_id {
            Some(folder_id) => {
                let folder = self.folders.get_by_id(folder_id).await?.ok_or_else(|| {
                    VaultError::NotFound(format!("Folder {} not found", folder_id))
                })?;
                assert_owned_by(&folder, owner.owner_ref())?;
                Some(folder)
            }
            None => None,
        };

        // 3. Random stored filename; the original name never reaches the disk
        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = match &folder {
            Some(folder) => format!("{}/{}", folder.path, stored_name),
            None => stored_name.clone(),
        };

        // 4. Write the file before the record so a failure leaves no dangling row
        let key = keys::document_key(owner, &path);
        self.disk.put(&key, request.data).await.map_err(|e| {
            tracing::error!(error = %e, key = %key, "Failed to write file to disk");
            VaultError::Disk(format!("Failed to store file: {}", e))
        })?;

        // 5. Persist metadata, removing the file again if the insert fails
        let flags = TypeFlags::from_extension(&extension);
        let new_document = NewDocument {
            documentable_type: owner.kind,
            documentable_id: owner.id,
            folder_id: request.folder_id,
            name: request.original_filename,
            stored_name,
            extension,
            mime_type,
            size: size as i64,
            path,
            is_image: flags.is_image,
            is_pdf: flags.is_pdf,
        };
        let document = match self.documents.insert(&new_document).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Failed to persist document record, removing file");
                if let Err(cleanup_err) = self.disk.delete(&key).await {
                    tracing::error!(error = %cleanup_err, key = %key, "Failed to remove file after insert failure");
                }
                return Err(e);
            }
        };

        tracing::info!(
            document_id = document.id,
            key = %key,
            size_bytes = size,
            "Document uploaded"
        );

        Ok(document)
    }

    /// Fetch a document's metadata, enforcing ownership.
    ///
    /// An ID that belongs to a different owner is reported as denied, not
    /// missing, so callers can distinguish the two cases.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, owner: OwnerRef, id: i64) -> VaultResult<Document> {
        let document = self
            .documents
            .get_by_id(id)
            .await?
            .ok_or_else(|| VaultError::NotFound(format!("Document {} not found", id)))?;
        assert_owned_by(&document, owner)?;
        Ok(document)
    }

    /// Read a document's bytes from disk
    #[tracing::instrument(skip(self))]
    pub async fn read_contents(
        &self,
        owner: &DocumentOwner,
        id: i64,
    ) -> VaultResult<DocumentContents> {
        let document = self.fetch(owner.owner_ref(), id).await?;

        let key = keys::document_key(owner, &document.path);
        let data = match self.disk.get(&key).await {
            Ok(data) => data,
            Err(DiskError::NotFound(_)) => {
                tracing::warn!(document_id = id, key = %key, "Document record has no file on disk");
                return Err(VaultError::FileMissingOnDisk(document.path.clone()));
            }
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Failed to read file from disk");
                return Err(VaultError::Disk(format!("Failed to read file: {}", e)));
            }
        };

        Ok(DocumentContents {
            data,
            mime_type: document.mime_type,
            original_filename: document.name,
        })
    }

    /// Delete a document: the record first, then its file.
    ///
    /// The record is authoritative; a file whose removal fails is left
    /// behind for the orphan sweeper.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, owner: &DocumentOwner, id: i64) -> VaultResult<()> {
        let document = self.fetch(owner.owner_ref(), id).await?;

        self.documents.delete(id).await?;

        let key = keys::document_key(owner, &document.path);
        if let Err(e) = self.disk.delete(&key).await {
            tracing::error!(error = %e, key = %key, "Failed to delete file, leaving it for the sweeper");
        }

        tracing::info!(document_id = id, key = %key, "Document deleted");
        Ok(())
    }

    /// List an owner's documents at the root or in one folder.
    ///
    /// The query itself is owner-scoped, so no per-record ownership check is
    /// involved; a folder ID belonging to someone else simply matches
    /// nothing.
    #[tracing::instrument(skip(self))]
    pub async fn list_documents(
        &self,
        owner: OwnerRef,
        folder_id: Option<i64>,
    ) -> VaultResult<Vec<Document>> {
        self.documents.list_for_owner(owner, folder_id).await
    }
}
