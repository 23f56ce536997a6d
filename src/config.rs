//! Configuration management for WhizzyVerse.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every value has a default, so a fresh install works
//! without any configuration at all.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

/// Default base URL of the site's REST API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Default `tracing` filter for diagnostics.
pub const DEFAULT_LOG_FILTER: &str = "whizzyverse=warn";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/whizzyverse/.env`
/// - macOS: `~/Library/Application Support/whizzyverse/.env`
/// - Windows: `%LOCALAPPDATA%/whizzyverse/.env`
///
/// A missing file is not an error. Values already present in the process
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or the
/// `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = base_data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the directory holding all application data.
///
/// Reads `WHIZZYVERSE_DATA_DIR`, falling back to `<data_local_dir>/whizzyverse`.
pub fn data_dir() -> PathBuf {
    match env::var("WHIZZYVERSE_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => base_data_dir(),
    }
}

/// Returns the base URL of the REST API, without a trailing slash.
///
/// Reads `WHIZZYVERSE_API_URL`, falling back to [`DEFAULT_API_URL`].
pub fn api_url() -> String {
    env::var("WHIZZYVERSE_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Returns the `tracing` filter directive, from `WHIZZYVERSE_LOG`.
pub fn log_filter() -> String {
    env::var("WHIZZYVERSE_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

fn base_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("whizzyverse");
    path
}
