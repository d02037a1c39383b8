//! Service layer for the document vault.
//!
//! This crate is the business layer: it owns the upload pipeline, ownership
//! enforcement, folder tree operations, and disk/record reconciliation.
//! Callers hand it an owner (kind, ID, storage UUID) and operate on
//! documents and folders by ID; everything below — key layout, SQL, disk
//! access — stays behind these services.

pub mod folders;
pub mod store;
pub mod sweep;

pub use folders::FolderManager;
pub use store::{DocumentContents, DocumentStore, UploadRequest};
pub use sweep::{OrphanSweeper, SweepMode, SweepReport};
