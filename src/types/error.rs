//! Error types for quick-backups

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors for a backup run
///
/// A permission denial while copying is not represented here: the copy
/// engine reports it as [`CopyOutcome::Locked`](super::CopyOutcome) and the
/// run carries on.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Configuration file missing or unreadable
    #[error("Configuration error: cannot read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML or is missing required keys
    #[error("Configuration error: invalid {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    /// Wholesale entry whose path has no final component to name the copy
    #[error("Invalid source path (no file name): {}", path.display())]
    InvalidSource { path: PathBuf },

    /// Unclassified filesystem error at `path`
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BackupError {
    /// Tag an IO error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Check if this error was raised while loading configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BackupError::ConfigRead { .. } | BackupError::ConfigParse { .. }
        )
    }

    /// Check if this error is a missing file or directory
    pub fn is_not_found(&self) -> bool {
        match self {
            BackupError::Io { source, .. } | BackupError::ConfigRead { source, .. } => {
                source.kind() == ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// Path the error refers to
    pub fn path(&self) -> &Path {
        match self {
            BackupError::ConfigRead { path, .. }
            | BackupError::ConfigParse { path, .. }
            | BackupError::InvalidSource { path }
            | BackupError::Io { path, .. } => path,
        }
    }
}
