//! Error types module
//!
//! This module provides the core error types used throughout the document
//! vault. All errors are unified under the `VaultError` enum which can
//! represent database, disk, validation, and access-control errors.

use std::io;

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for integrity drift and access violations
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Disk error: {0}")]
    Disk(String),

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied: resource belongs to a different owner")]
    AccessDenied,

    #[error("File missing on disk: {0}")]
    FileMissingOnDisk(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for VaultError {
    fn from(err: SqlxError) -> Self {
        VaultError::Database(err)
    }
}

impl From<io::Error> for VaultError {
    fn from(err: io::Error) -> Self {
        VaultError::Internal(format!("IO error: {}", err))
    }
}

impl VaultError {
    /// Get the error type name for structured log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            VaultError::Database(_) => "Database",
            VaultError::Disk(_) => "Disk",
            VaultError::FileTooLarge { .. } => "FileTooLarge",
            VaultError::EmptyFile => "EmptyFile",
            VaultError::UnsupportedFileType(_) => "UnsupportedFileType",
            VaultError::InvalidName(_) => "InvalidName",
            VaultError::NotFound(_) => "NotFound",
            VaultError::AccessDenied => "AccessDenied",
            VaultError::FileMissingOnDisk(_) => "FileMissingOnDisk",
            VaultError::Config(_) => "Config",
            VaultError::Internal(_) => "Internal",
        }
    }

    /// Log level at which this error should be reported.
    ///
    /// Validation rejections are routine and stay at debug. Access-control
    /// failures and integrity drift mean a caller or the disk is out of step
    /// with the database and warrant a warning. Everything else is an error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            VaultError::FileTooLarge { .. }
            | VaultError::EmptyFile
            | VaultError::UnsupportedFileType(_)
            | VaultError::InvalidName(_)
            | VaultError::NotFound(_) => LogLevel::Debug,
            VaultError::AccessDenied | VaultError::FileMissingOnDisk(_) => LogLevel::Warn,
            VaultError::Database(_)
            | VaultError::Disk(_)
            | VaultError::Config(_)
            | VaultError::Internal(_) => LogLevel::Error,
        }
    }
}

/// Convenience alias used throughout the vault crates.
pub type VaultResult<T> = Result<T, VaultError>;
