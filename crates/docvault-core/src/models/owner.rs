use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// CRM entity kinds that may own documents and folders.
///
/// Stored as snake_case text in the `documentable_type` / `folderable_type`
/// columns and used to derive the per-kind storage root directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum OwnerKind {
    Client,
    Property,
    Room,
    Condominium,
    Contract,
    Proposal,
    CalendarEvent,
}

impl OwnerKind {
    pub const ALL: [OwnerKind; 7] = [
        OwnerKind::Client,
        OwnerKind::Property,
        OwnerKind::Room,
        OwnerKind::Condominium,
        OwnerKind::Contract,
        OwnerKind::Proposal,
        OwnerKind::CalendarEvent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::Client => "client",
            OwnerKind::Property => "property",
            OwnerKind::Room => "room",
            OwnerKind::Condominium => "condominium",
            OwnerKind::Contract => "contract",
            OwnerKind::Proposal => "proposal",
            OwnerKind::CalendarEvent => "calendar_event",
        }
    }

    /// Top-level storage directory for this kind, e.g. `property_documents`.
    pub fn storage_root_name(&self) -> String {
        format!("{}_documents", self.as_str())
    }

    /// Inverse of [`storage_root_name`](Self::storage_root_name), used when
    /// mapping disk entries back to owners.
    pub fn from_storage_root(root: &str) -> Option<OwnerKind> {
        let kind = root.strip_suffix("_documents")?;
        OwnerKind::ALL.iter().copied().find(|k| k.as_str() == kind)
    }
}

impl std::fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a concrete owning entity, e.g. property 42.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    pub kind: OwnerKind,
    pub id: i64,
}

impl OwnerRef {
    pub fn new(kind: OwnerKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// An owner together with its storage identity.
///
/// Each entity that stores documents is assigned a random UUID on first use;
/// all of its files live under `{kind}_documents/{uuid}/`. The UUID is the
/// only entity-specific component that ever appears in a disk path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOwner {
    pub kind: OwnerKind,
    pub id: i64,
    pub uuid: Uuid,
}

impl DocumentOwner {
    pub fn new(kind: OwnerKind, id: i64, uuid: Uuid) -> Self {
        Self { kind, id, uuid }
    }

    /// Owner with a freshly generated storage UUID, for first-time use.
    pub fn with_new_uuid(kind: OwnerKind, id: i64) -> Self {
        Self::new(kind, id, Uuid::new_v4())
    }

    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef::new(self.kind, self.id)
    }

    /// Root directory for this owner's files, e.g.
    /// `property_documents/5f9c.../`.
    pub fn storage_root(&self) -> String {
        format!("{}/{}", self.kind.storage_root_name(), self.uuid)
    }
}
