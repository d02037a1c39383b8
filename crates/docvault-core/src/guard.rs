//! Ownership guard
//!
//! Every fetched record is checked against the requesting owner before any
//! read, download, or delete proceeds. Isolation between owners is purely
//! logical; this check and the owner-scoped path prefixes are what keep one
//! entity out of another's files.

use crate::error::VaultError;
use crate::models::{Document, Folder, OwnerRef};

/// Implemented by records that carry a polymorphic owner reference.
pub trait Owned {
    fn record_owner(&self) -> OwnerRef;
}

impl Owned for Document {
    fn record_owner(&self) -> OwnerRef {
        self.owner_ref()
    }
}

impl Owned for Folder {
    fn record_owner(&self) -> OwnerRef {
        self.owner_ref()
    }
}

/// Verify that `record` belongs to `owner`, comparing kind and id.
///
/// Existence is decided before this check, so callers can keep `NotFound`
/// and `AccessDenied` distinct.
pub fn assert_owned_by<R: Owned>(record: &R, owner: OwnerRef) -> Result<(), VaultError> {
    if record.record_owner() == owner {
        Ok(())
    } else {
        Err(VaultError::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnerKind;
    use chrono::Utc;

    fn folder_owned_by(kind: OwnerKind, id: i64) -> Folder {
        Folder {
            id: 1,
            folderable_type: kind,
            folderable_id: id,
            parent_folder_id: None,
            name: "Contratti".to_string(),
            path: "Contratti".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matching_owner_passes() {
        let folder = folder_owned_by(OwnerKind::Property, 42);
        let owner = OwnerRef::new(OwnerKind::Property, 42);
        assert!(assert_owned_by(&folder, owner).is_ok());
    }

    #[test]
    fn test_wrong_id_is_denied() {
        let folder = folder_owned_by(OwnerKind::Property, 42);
        let owner = OwnerRef::new(OwnerKind::Property, 43);
        assert!(matches!(
            assert_owned_by(&folder, owner),
            Err(VaultError::AccessDenied)
        ));
    }

    #[test]
    fn test_wrong_kind_is_denied() {
        // Same numeric id under a different kind must not pass.
        let folder = folder_owned_by(OwnerKind::Property, 42);
        let owner = OwnerRef::new(OwnerKind::Client, 42);
        assert!(matches!(
            assert_owned_by(&folder, owner),
            Err(VaultError::AccessDenied)
        ));
    }
}
