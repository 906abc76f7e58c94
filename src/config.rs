//! # Configuration Module
//!
//! Locates the catalog database. Srotify keeps it in the platform-standard
//! data directory:
//! - Linux: `~/.local/share/srotify/catalog.db`
//! - macOS: `~/Library/Application Support/srotify/catalog.db`
//! - Windows: `%APPDATA%\srotify\catalog.db`
//!
//! The command line resolves overrides: the `--db` flag, or the `SROTIFY_DB`
//! environment variable that clap reads into the same flag. Either one reaches
//! [`RuntimeConfig::resolve`] as an explicit path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Returns the platform-appropriate data directory, creating it if missing.
///
/// # Errors
///
/// Fails when the system data directory cannot be determined or the
/// `srotify` subdirectory cannot be created.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Pass --db to choose a database location."
        )
    })?;

    let srotify_dir = data_dir.join("srotify");
    fs::create_dir_all(&srotify_dir).with_context(|| {
        format!(
            "Failed to create Srotify data directory at {}. Please check file permissions.",
            srotify_dir.display()
        )
    })?;

    Ok(srotify_dir)
}

/// Returns the default catalog database path.
///
/// # Examples
///
/// ```no_run
/// use srotify::config::get_db_path;
///
/// let db_path = get_db_path()?;
/// println!("Catalog location: {}", db_path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("catalog.db"))
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Path to the catalog database file
    pub db_path: PathBuf,
}

impl RuntimeConfig {
    /// Create configuration with the platform-default database path
    pub fn new() -> Result<Self> {
        Ok(Self {
            db_path: get_db_path()?,
        })
    }

    /// Use an explicit database path, falling back to [`RuntimeConfig::new`].
    pub fn resolve(db_path: Option<PathBuf>) -> Result<Self> {
        match db_path {
            Some(db_path) => Ok(Self::with_db_path(db_path)),
            None => Self::new(),
        }
    }

    /// Create configuration with explicit database path
    #[must_use]
    pub fn with_db_path(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_structure() {
        let path = get_db_path().expect("Should get valid path");

        assert_eq!(path.file_name().unwrap(), "catalog.db");
        let parent = path.parent().expect("Should have parent directory");
        assert_eq!(parent.file_name().unwrap(), "srotify");
        assert!(parent.is_dir());
    }

    #[test]
    fn test_get_db_path_consistent_results() {
        let path1 = get_db_path().expect("First call should succeed");
        let path2 = get_db_path().expect("Second call should succeed");
        assert_eq!(path1, path2);
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/elsewhere.db");
        let config = RuntimeConfig::resolve(Some(explicit.clone())).unwrap();
        assert_eq!(config, RuntimeConfig::with_db_path(explicit));
    }

    #[test]
    fn test_missing_path_falls_back_to_platform_default() {
        let config = RuntimeConfig::resolve(None).unwrap();
        assert_eq!(config.db_path, get_db_path().unwrap());
        assert_eq!(config, RuntimeConfig::new().unwrap());
    }
}
