//! Validation modules

pub mod name;
pub mod upload;

pub use name::{validate_folder_name, MAX_FOLDER_NAME_LENGTH};
pub use upload::{expected_mime_types, normalize_mime_type, UploadPolicy};
