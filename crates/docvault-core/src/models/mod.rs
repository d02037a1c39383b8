//! Data models for the document vault
//!
//! Owner identity, document metadata, and folder-tree records shared by the
//! storage, database, and service layers.

mod document;
mod folder;
mod owner;

pub use document::*;
pub use folder::*;
pub use owner::*;
