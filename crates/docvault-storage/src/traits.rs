//! Disk abstraction trait
//!
//! This module defines the Disk trait that all disk backends must implement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Disk operation errors
#[derive(Debug, Error)]
pub enum DiskError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid disk key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for disk operations
pub type DiskResult<T> = Result<T, DiskError>;

/// One file on the disk, as reported by [`Disk::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskEntry {
    pub key: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Private binary disk abstraction
///
/// The disk is not publicly addressable: nothing here produces URLs, and
/// callers only reach files through the service layer, which owns key
/// construction and ownership checks.
///
/// **Key format:** `{kind}_documents/{owner_uuid}/{relative_path}`. Keys must
/// not contain `..` or a leading `/`. Key construction and parsing are
/// centralized in the `keys` module so every caller stays consistent.
#[async_trait]
pub trait Disk: Send + Sync {
    /// Write `data` at `key`, creating parent directories as needed.
    /// Overwrites silently; stored filenames are random so collisions do not
    /// occur in practice.
    async fn put(&self, key: &str, data: Vec<u8>) -> DiskResult<()>;

    /// Read the full contents at `key`.
    async fn get(&self, key: &str) -> DiskResult<Vec<u8>>;

    /// Delete the file at `key`. Deleting a missing file is not an error.
    async fn delete(&self, key: &str) -> DiskResult<()>;

    /// Check if a file exists
    async fn exists(&self, key: &str) -> DiskResult<bool>;

    /// Get the size in bytes of a file, if it exists.
    async fn content_length(&self, key: &str) -> DiskResult<u64>;

    /// List every file under `prefix` recursively; an empty prefix lists the
    /// whole disk. Directories themselves are not reported.
    async fn list(&self, prefix: &str) -> DiskResult<Vec<DiskEntry>>;
}
