//! Path utilities for Soulmate directory resolution.
//!
//! Re-exported by soulmate-core for convenience.

use anyhow::Result;
use std::path::PathBuf;

const SOULMATE_DIR: &str = ".soulmate";
const DB_FILE: &str = "soulmate.db";
const LOGS_DIR: &str = "logs";

/// Environment variable to override the Soulmate directory.
const SOULMATE_DIR_ENV: &str = "SOULMATE_DIR";

/// Resolve the Soulmate data directory.
/// Priority: SOULMATE_DIR env var > ~/.soulmate/
pub fn resolve_soulmate_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(SOULMATE_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(SOULMATE_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the Soulmate directory exists and return its path.
pub fn ensure_soulmate_dir() -> Result<PathBuf> {
    let dir = resolve_soulmate_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Database path inside an existing Soulmate directory: ~/.soulmate/soulmate.db
pub fn ensure_database_path_string() -> Result<String> {
    Ok(ensure_soulmate_dir()?
        .join(DB_FILE)
        .to_string_lossy()
        .into_owned())
}

/// Logs directory: ~/.soulmate/logs/
pub fn logs_dir() -> Result<PathBuf> {
    let dir = ensure_soulmate_dir()?.join(LOGS_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
