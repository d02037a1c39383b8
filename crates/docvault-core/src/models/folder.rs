use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::owner::{OwnerKind, OwnerRef};

/// Folder in an owner's document tree.
///
/// `path` is the materialized ancestor chain: the folder's own name for a
/// root folder, else `{parent.path}/{name}`. It is computed once at creation
/// and cached on the record; folders are immutable after creation apart from
/// deletion, so the cached value never goes stale.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    pub id: i64,
    pub folderable_type: OwnerKind,
    pub folderable_id: i64,
    pub parent_folder_id: Option<i64>,
    pub name: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl Folder {
    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef::new(self.folderable_type, self.folderable_id)
    }
}

/// Materialized path for a folder created under `parent` with `name`.
///
/// Root-to-leaf ancestor names joined with `/`; a folder without a parent
/// yields just its own name.
pub fn folder_path(parent: Option<&Folder>, name: &str) -> String {
    match parent {
        Some(p) => format!("{}/{}", p.path, name),
        None => name.to_string(),
    }
}
