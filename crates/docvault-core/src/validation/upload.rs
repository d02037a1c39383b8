use crate::error::VaultError;

/// Strip MIME parameters (`; charset=...`) and lowercase.
///
/// Comparison and storage both use the normalized form, so parameters can
/// never bypass the allow-list.
pub fn normalize_mime_type(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(mime_type)
        .to_lowercase()
}

/// Expected MIME types for a known extension.
///
/// Returns `None` for extensions outside the table; upload validation treats
/// that as a rejection rather than skipping the cross-check, so a file can
/// only pass when its extension and declared MIME type agree.
pub fn expected_mime_types(extension: &str) -> Option<&'static [&'static str]> {
    let expected: &[&str] = match extension {
        "jpg" | "jpeg" => &["image/jpeg"],
        "png" => &["image/png"],
        "gif" => &["image/gif"],
        "webp" => &["image/webp"],
        "pdf" => &["application/pdf"],
        "doc" => &["application/msword"],
        "docx" => &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
        "xls" => &["application/vnd.ms-excel"],
        "xlsx" => &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
        "txt" => &["text/plain"],
        "csv" => &["text/csv", "application/csv"],
        _ => return None,
    };
    Some(expected)
}

/// Upload validation policy
///
/// Checks run in a fixed order: size, extension allow-list, MIME allow-list,
/// extension/MIME cross-check. Limits and allow-lists come from
/// configuration; the cross-check table is fixed.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_mime_types: Vec<String>,
}

impl UploadPolicy {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_mime_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_mime_types,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), VaultError> {
        if size == 0 {
            return Err(VaultError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(VaultError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate the declared file extension, returning it lowercased.
    pub fn validate_extension(&self, extension: &str) -> Result<String, VaultError> {
        let extension = extension.to_lowercase();
        if extension.is_empty() {
            return Err(VaultError::UnsupportedFileType(
                "empty file extension".to_string(),
            ));
        }

        if !self.allowed_extensions.contains(&extension) {
            return Err(VaultError::UnsupportedFileType(format!(
                "extension '{}' not allowed (allowed: {})",
                extension,
                self.allowed_extensions.join(", ")
            )));
        }

        Ok(extension)
    }

    /// Validate the MIME type against the allow-list, returning the
    /// normalized form to persist.
    pub fn validate_mime_type(&self, mime_type: &str) -> Result<String, VaultError> {
        let normalized = normalize_mime_type(mime_type);

        if !self.allowed_mime_types.iter().any(|m| m == &normalized) {
            return Err(VaultError::UnsupportedFileType(format!(
                "MIME type '{}' not allowed (allowed: {})",
                mime_type,
                self.allowed_mime_types.join(", ")
            )));
        }

        Ok(normalized)
    }

    /// Validate that the declared MIME type matches the file extension.
    ///
    /// Prevents spoofing where a disallowed payload is uploaded under an
    /// allowed MIME type or extension.
    pub fn validate_mime_matches_extension(
        extension: &str,
        mime_type: &str,
    ) -> Result<(), VaultError> {
        let expected = expected_mime_types(extension).ok_or_else(|| {
            VaultError::UnsupportedFileType(format!(
                "no known MIME types for extension '{}'",
                extension
            ))
        })?;

        let normalized = normalize_mime_type(mime_type);
        if !expected.iter().any(|m| *m == normalized) {
            return Err(VaultError::UnsupportedFileType(format!(
                "MIME type '{}' does not match extension '{}' (expected one of: {})",
                mime_type,
                extension,
                expected.join(", ")
            )));
        }

        Ok(())
    }

    /// Run all upload checks; returns the validated lowercase extension and
    /// the normalized MIME type.
    pub fn validate_upload(
        &self,
        extension: &str,
        mime_type: &str,
        size: usize,
    ) -> Result<(String, String), VaultError> {
        self.validate_file_size(size)?;
        let extension = self.validate_extension(extension)?;
        let normalized = self.validate_mime_type(mime_type)?;
        Self::validate_mime_matches_extension(&extension, &normalized)?;
        Ok((extension, normalized))
    }
}
