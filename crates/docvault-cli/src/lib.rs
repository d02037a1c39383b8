use docvault_core::{LogLevel, VaultError};

/// Render a byte count as a human-readable size.
pub fn format_size(bytes: i64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.2} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Log a vault error at its own severity before surfacing it.
pub fn report_error(err: &VaultError) {
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %err, error_type = err.error_type(), "Operation failed")
        }
        LogLevel::Warn => {
            tracing::warn!(error = %err, error_type = err.error_type(), "Operation failed")
        }
        LogLevel::Error => {
            tracing::error!(error = %err, error_type = err.error_type(), "Operation failed")
        }
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
