//! Shared key construction for disk backends.
//!
//! Key format: `{kind}_documents/{owner_uuid}/{relative_path}`, where the
//! relative path is the stored filename alone for root-level documents or
//! `{folder_path}/{stored_filename}` inside a folder.

use docvault_core::models::{DocumentOwner, OwnerKind};
use uuid::Uuid;

/// Build the full disk key for a document under `owner`.
///
/// All backends and services must use this format for consistency.
pub fn document_key(owner: &DocumentOwner, relative_path: &str) -> String {
    format!("{}/{}", owner.storage_root(), relative_path)
}

/// A disk key decomposed into its owner components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub kind: OwnerKind,
    pub owner_uuid: Uuid,
    pub relative_path: String,
}

/// Parse a disk key back into owner kind, owner UUID, and relative path.
///
/// Returns `None` for keys that do not follow the documented layout; the
/// orphan sweeper treats those as foreign files and leaves them alone.
pub fn parse_document_key(key: &str) -> Option<ParsedKey> {
    let mut parts = key.splitn(3, '/');
    let root = parts.next()?;
    let uuid = parts.next()?;
    let relative_path = parts.next()?;

    if relative_path.is_empty() {
        return None;
    }

    Some(ParsedKey {
        kind: OwnerKind::from_storage_root(root)?,
        owner_uuid: Uuid::parse_str(uuid).ok()?,
        relative_path: relative_path.to_string(),
    })
}
