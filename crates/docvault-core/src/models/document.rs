use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::owner::{OwnerKind, OwnerRef};

/// Extensions classified as images when deriving type flags.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Derived type flags, computed once from the extension at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFlags {
    pub is_image: bool,
    pub is_pdf: bool,
}

impl TypeFlags {
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.to_lowercase();
        Self {
            is_image: IMAGE_EXTENSIONS.contains(&ext.as_str()),
            is_pdf: ext == "pdf",
        }
    }
}

/// Metadata record for one stored file.
///
/// `path` is relative to the owner's storage root: the stored filename alone
/// for a root-level document, else `{folder_path}/{stored_name}`. The full
/// disk key prepends `{kind}_documents/{owner_uuid}/`; key layout lives in
/// the storage crate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: i64,
    pub documentable_type: OwnerKind,
    pub documentable_id: i64,
    pub folder_id: Option<i64>,
    /// Original filename as uploaded, display only.
    pub name: String,
    /// Random stored filename, `{uuid}.{extension}`.
    pub stored_name: String,
    pub extension: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub is_image: bool,
    pub is_pdf: bool,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef::new(self.documentable_type, self.documentable_id)
    }
}

/// Insert payload for a new document record.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub documentable_type: OwnerKind,
    pub documentable_id: i64,
    pub folder_id: Option<i64>,
    pub name: String,
    pub stored_name: String,
    pub extension: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub is_image: bool,
    pub is_pdf: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_flags_pdf() {
        let flags = TypeFlags::from_extension("pdf");
        assert!(flags.is_pdf);
        assert!(!flags.is_image);
    }

    #[test]
    fn test_type_flags_image() {
        for ext in ["jpg", "jpeg", "png", "JPG"] {
            let flags = TypeFlags::from_extension(ext);
            assert!(flags.is_image, "{ext} should be an image");
            assert!(!flags.is_pdf);
        }
    }

    #[test]
    fn test_type_flags_neither() {
        let flags = TypeFlags::from_extension("docx");
        assert!(!flags.is_image);
        assert!(!flags.is_pdf);
    }

    #[test]
    fn test_owner_ref() {
        let doc = Document {
            id: 1,
            documentable_type: OwnerKind::Property,
            documentable_id: 7,
            folder_id: Some(3),
            name: "lease.pdf".to_string(),
            stored_name: "abc.pdf".to_string(),
            extension: "pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 10,
            path: "Contratti/2024/abc.pdf".to_string(),
            is_image: false,
            is_pdf: true,
            created_at: Utc::now(),
        };
        assert_eq!(doc.owner_ref(), OwnerRef::new(OwnerKind::Property, 7));
    }
}
