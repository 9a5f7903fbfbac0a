//! Back-office configuration

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

use buildbook_storage::{DEFAULT_NAMESPACE, DEFAULT_QUOTA_BYTES};

/// Environment variable that overrides the platform data directory.
pub const DATA_DIR_ENV: &str = "BUILDBOOK_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Prefix of every storage key
    pub namespace: String,
    /// Upper bound on stored bytes across all keys
    pub quota_bytes: u64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("buildbook.db"),
            namespace: DEFAULT_NAMESPACE.to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }

    /// `BUILDBOOK_DATA_DIR` when set and non-empty, otherwise the
    /// platform's local data directory.
    pub fn data_dir() -> PathBuf {
        data_dir_from(std::env::var_os(DATA_DIR_ENV))
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(crate::CoreError::Config(
                "storage namespace must not be empty".to_string(),
            ));
        }
        if self.quota_bytes == 0 {
            return Err(crate::CoreError::Config(
                "storage quota must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn data_dir_from(override_dir: Option<OsString>) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::data_local_dir()
            .map(|d| d.join("Buildbook"))
            .unwrap_or_else(|| PathBuf::from(".buildbook")),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
