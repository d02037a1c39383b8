//! Vault configuration
//!
//! All settings come from environment variables with sensible defaults, so a
//! bare checkout runs against a local SQLite file and `./storage`.

use std::env;

use crate::validation::UploadPolicy;

const MAX_FILE_SIZE_MB: usize = 10;
const DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_EXTENSIONS: &str = "pdf,doc,docx,jpg,jpeg,png";
const DEFAULT_MIME_TYPES: &str = "application/pdf,application/msword,\
application/vnd.openxmlformats-officedocument.wordprocessingml.document,\
image/jpeg,image/png";

#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub database_url: String,
    /// Base directory of the private disk.
    pub storage_root: String,
    pub db_max_connections: u32,
    /// Upload size limit in bytes.
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_mime_types: Vec<String>,
}

impl VaultConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://docvault.db".to_string());

        let storage_root = env::var("STORAGE_ROOT").unwrap_or_else(|_| "./storage".to_string());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DB_MAX_CONNECTIONS.to_string())
            .parse()
            .unwrap_or(DB_MAX_CONNECTIONS);

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_extensions = parse_list(
            &env::var("ALLOWED_EXTENSIONS").unwrap_or_else(|_| DEFAULT_EXTENSIONS.to_string()),
        );

        let allowed_mime_types = parse_list(
            &env::var("ALLOWED_MIME_TYPES").unwrap_or_else(|_| DEFAULT_MIME_TYPES.to_string()),
        );

        if max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must not be empty"));
        }
        if allowed_mime_types.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_MIME_TYPES must not be empty"));
        }

        Ok(Self {
            database_url,
            storage_root,
            db_max_connections,
            max_file_size: max_file_size_mb * 1024 * 1024,
            allowed_extensions,
            allowed_mime_types,
        })
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(
            self.max_file_size,
            self.allowed_extensions.clone(),
            self.allowed_mime_types.clone(),
        )
    }
}

/// Split a comma-separated list, trimming and lowercasing each entry.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
