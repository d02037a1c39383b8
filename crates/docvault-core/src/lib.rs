//! Docvault Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! validation shared across all docvault components.

pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::VaultConfig;
pub use error::{LogLevel, VaultError, VaultResult};
pub use guard::{assert_owned_by, Owned};
pub use models::{
    folder_path, Document, DocumentOwner, Folder, NewDocument, OwnerKind, OwnerRef, TypeFlags,
};
pub use validation::{validate_folder_name, UploadPolicy};
