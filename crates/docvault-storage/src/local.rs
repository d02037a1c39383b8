use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{Disk, DiskEntry, DiskError, DiskResult};

/// Local filesystem disk implementation
#[derive(Clone)]
pub struct LocalDisk {
    base_path: PathBuf,
}

impl LocalDisk {
    /// Create a new LocalDisk rooted at `base_path`, creating the directory
    /// if it does not exist.
    pub async fn new(base_path: impl Into<PathBuf>) -> DiskResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            DiskError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalDisk { base_path })
    }

    /// Convert a disk key to a filesystem path with security validation
    ///
    /// Rejects keys that could escape the base directory, either textually
    /// (`..`, leading `/`) or through a symlink on an existing ancestor.
    fn key_to_path(&self, key: &str) -> DiskResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(DiskError::InvalidKey(
                "disk key contains invalid characters".to_string(),
            ));
        }

        let path = self.base_path.join(key);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            DiskError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        // Canonicalize the nearest existing ancestor so that symlinks cannot
        // redirect a not-yet-created path outside the base directory.
        let mut probe = path.as_path();
        let existing = loop {
            if probe.exists() {
                break probe;
            }
            match probe.parent() {
                Some(parent) => probe = parent,
                None => break self.base_path.as_path(),
            }
        };

        let canonical = existing.canonicalize().map_err(|e| {
            DiskError::InvalidKey(format!("Failed to resolve {}: {}", existing.display(), e))
        })?;

        if canonical.strip_prefix(&base_canonical).is_err() {
            return Err(DiskError::InvalidKey(
                "disk key resolves outside the storage directory".to_string(),
            ));
        }

        Ok(path)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> DiskResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    fn entry_key(&self, path: &Path) -> DiskResult<String> {
        let relative = path.strip_prefix(&self.base_path).map_err(|_| {
            DiskError::ListFailed(format!(
                "entry {} is outside the storage directory",
                path.display()
            ))
        })?;
        Ok(relative.to_string_lossy().to_string())
    }
}

#[async_trait]
impl Disk for LocalDisk {
    async fn put(&self, key: &str, data: Vec<u8>) -> DiskResult<()> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            DiskError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            DiskError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            DiskError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local disk write successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> DiskResult<Vec<u8>> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(DiskError::NotFound(key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            DiskError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local disk read successful"
        );

        Ok(data)
    }

    async fn delete(&self, key: &str) -> DiskResult<()> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            DiskError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local disk delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &str) -> DiskResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn content_length(&self, key: &str) -> DiskResult<u64> {
        let path = self.key_to_path(key)?;
        let meta = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DiskError::NotFound(key.to_string())
            } else {
                DiskError::ReadFailed(e.to_string())
            }
        })?;
        Ok(meta.len())
    }

    async fn list(&self, prefix: &str) -> DiskResult<Vec<DiskEntry>> {
        let root = if prefix.is_empty() {
            self.base_path.clone()
        } else {
            self.key_to_path(prefix)?
        };

        let mut entries = Vec::new();
        if !fs::try_exists(&root).await.unwrap_or(false) {
            return Ok(entries);
        }

        let start = std::time::Instant::now();
        let mut stack = vec![root];

        while let Some(dir) = stack.pop() {
            let mut read_dir = fs::read_dir(&dir).await.map_err(|e| {
                DiskError::ListFailed(format!("Failed to read directory {}: {}", dir.display(), e))
            })?;

            while let Some(entry) = read_dir.next_entry().await.map_err(|e| {
                DiskError::ListFailed(format!("Failed to read directory {}: {}", dir.display(), e))
            })? {
                let path = entry.path();
                let meta = entry.metadata().await.map_err(|e| {
                    DiskError::ListFailed(format!(
                        "Failed to read metadata for {}: {}",
                        path.display(),
                        e
                    ))
                })?;

                if meta.is_dir() {
                    stack.push(path);
                } else {
                    entries.push(DiskEntry {
                        key: self.entry_key(&path)?,
                        size: meta.len(),
                        modified: meta.modified().ok().map(DateTime::<Utc>::from),
                    });
                }
            }
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));

        tracing::info!(
            prefix = %prefix,
            count = entries.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local disk list complete"
        );

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path()).await.unwrap();

        let data = b"test data".to_vec();
        disk.put("client_documents/x/test.pdf", data.clone())
            .await
            .unwrap();

        let read = disk.get("client_documents/x/test.pdf").await.unwrap();
        assert_eq!(data, read);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path()).await.unwrap();

        let result = disk.get("../../../etc/passwd").await;
        assert!(matches!(result, Err(DiskError::InvalidKey(_))));

        let result = disk.delete("../etc/passwd").await;
        assert!(matches!(result, Err(DiskError::InvalidKey(_))));

        let result = disk.exists("/etc/passwd").await;
        assert!(matches!(result, Err(DiskError::InvalidKey(_))));

        let result = disk.put("", b"x".to_vec()).await;
        assert!(matches!(result, Err(DiskError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path()).await.unwrap();

        let result = disk.get("nope/missing.pdf").await;
        assert!(matches!(result, Err(DiskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path()).await.unwrap();

        assert!(disk.delete("nonexistent/file.pdf").await.is_ok());
    }

    #[tokio::test]
    async fn test_exists_and_content_length() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path()).await.unwrap();

        disk.put("a/b.bin", vec![0u8; 42]).await.unwrap();

        assert!(disk.exists("a/b.bin").await.unwrap());
        assert!(!disk.exists("a/c.bin").await.unwrap());
        assert_eq!(disk.content_length("a/b.bin").await.unwrap(), 42);
        assert!(matches!(
            disk.content_length("a/c.bin").await,
            Err(DiskError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_recursive_with_prefix() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path()).await.unwrap();

        disk.put("property_documents/u1/a.pdf", b"aa".to_vec())
            .await
            .unwrap();
        disk.put("property_documents/u1/Contratti/b.pdf", b"bbb".to_vec())
            .await
            .unwrap();
        disk.put("client_documents/u2/c.pdf", b"c".to_vec())
            .await
            .unwrap();

        let all = disk.list("").await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| e.modified.is_some()));

        let scoped = disk.list("property_documents").await.unwrap();
        let keys: Vec<_> = scoped.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "property_documents/u1/Contratti/b.pdf",
                "property_documents/u1/a.pdf"
            ]
        );
        assert_eq!(scoped[0].size, 3);
    }

    #[tokio::test]
    async fn test_list_missing_prefix_is_empty() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path()).await.unwrap();

        let entries = disk.list("room_documents").await.unwrap();
        assert!(entries.is_empty());
    }
}
