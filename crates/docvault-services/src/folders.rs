//! Folder tree service

use std::sync::Arc;

use docvault_core::{
    assert_owned_by, folder_path, validate_folder_name, DocumentOwner, Folder, OwnerRef,
    VaultError, VaultResult,
};
use docvault_db::FolderRepository;
use docvault_storage::{keys, Disk};

/// Folder tree service: creation, listing, recursive deletion
#[derive(Clone)]
pub struct FolderManager {
    folders: FolderRepository,
    disk: Arc<dyn Disk>,
}

impl FolderManager {
    pub fn new(folders: FolderRepository, disk: Arc<dyn Disk>) -> Self {
        Self { folders, disk }
    }

    /// Create a folder under an optional parent.
    ///
    /// The materialized path is computed from the parent and written in the
    /// same insert, so a folder row is never visible without its path.
    #[tracing::instrument(skip(self))]
    pub async fn create_folder(
        &self,
        owner: OwnerRef,
        name: &str,
        parent_folder_id: Option<i64>,
    ) -> VaultResult<Folder> {
        validate_folder_name(name)?;

        let parent = match parent_folder_id {
            Some(parent_id) => {
                let parent = self.folders.get_by_id(parent_id).await?.ok_or_else(|| {
                    VaultError::NotFound(format!("Folder {} not found", parent_id))
                })?;
                assert_owned_by(&parent, owner)?;
                Some(parent)
            }
            None => None,
        };

        let path = folder_path(parent.as_ref(), name);
        let folder = self
            .folders
            .insert(owner, parent_folder_id, name, &path)
            .await?;

        tracing::info!(folder_id = folder.id, path = %folder.path, "Folder created");
        Ok(folder)
    }

    /// Delete a folder and everything beneath it.
    ///
    /// Document paths are collected up front; the row delete then cascades
    /// through subfolders and document records, and the files are removed
    /// afterwards. A file whose removal fails is left for the sweeper.
    #[tracing::instrument(skip(self, owner), fields(owner = %owner.owner_ref()))]
    pub async fn delete_folder(&self, owner: &DocumentOwner, id: i64) -> VaultResult<()> {
        let folder = self
            .folders
            .get_by_id(id)
            .await?
            .ok_or_else(|| VaultError::NotFound(format!("Folder {} not found", id)))?;
        assert_owned_by(&folder, owner.owner_ref())?;

        let paths = self.folders.collect_subtree_document_paths(id).await?;
        self.folders.delete(id).await?;

        for path in &paths {
            let key = keys::document_key(owner, path);
            if let Err(e) = self.disk.delete(&key).await {
                tracing::error!(error = %e, key = %key, "Failed to delete file under removed folder");
            }
        }

        tracing::info!(
            folder_id = id,
            path = %folder.path,
            documents = paths.len(),
            "Folder deleted"
        );
        Ok(())
    }

    /// List an owner's folders at the root or under one parent
    #[tracing::instrument(skip(self))]
    pub async fn list_folders(
        &self,
        owner: OwnerRef,
        parent_folder_id: Option<i64>,
    ) -> VaultResult<Vec<Folder>> {
        self.folders.list_for_owner(owner, parent_folder_id).await
    }
}
