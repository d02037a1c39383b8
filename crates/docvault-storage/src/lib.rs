//! Docvault Storage Library
//!
//! This crate provides the private disk abstraction and its local filesystem
//! implementation.
//!
//! # Disk key format
//!
//! Keys are owner-scoped. All backends use the same key layout:
//!
//! - **Root-level document**: `{kind}_documents/{owner_uuid}/{stored_name}`
//! - **Document in a folder**: `{kind}_documents/{owner_uuid}/{folder_path}/{stored_name}`
//!
//! Keys must not contain `..` or a leading `/`. Key construction and parsing
//! are centralized in the `keys` module so all callers stay consistent.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalDisk;
pub use traits::{Disk, DiskEntry, DiskError, DiskResult};
