use std::sync::OnceLock;

use regex::Regex;

use crate::error::VaultError;

pub const MAX_FOLDER_NAME_LENGTH: usize = 100;

fn folder_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Word characters, spaces, and hyphens. No separators, no dots, so a
    // name can never smuggle a path component.
    RE.get_or_init(|| Regex::new(r"^[\w\s-]+$").expect("folder name regex"))
}

/// Validate a folder name against the character and length rules.
///
/// Names are used verbatim as path segments of the materialized folder path,
/// so anything that could alter path structure is rejected here.
pub fn validate_folder_name(name: &str) -> Result<(), VaultError> {
    if name.trim().is_empty() {
        return Err(VaultError::InvalidName(
            "folder name must not be empty".to_string(),
        ));
    }

    if name.chars().count() > MAX_FOLDER_NAME_LENGTH {
        return Err(VaultError::InvalidName(format!(
            "folder name exceeds {} characters",
            MAX_FOLDER_NAME_LENGTH
        )));
    }

    if !folder_name_regex().is_match(name) {
        return Err(VaultError::InvalidName(format!(
            "folder name '{}' contains invalid characters (allowed: letters, digits, spaces, '_', '-')",
            name
        )));
    }

    Ok(())
}
