//! # quick-backups - Configuration-driven file backups
//!
//! Reads named source paths from a YAML file and copies each one into a
//! flat backup directory, replacing the previous copy.

// Module declarations
pub mod config;
pub mod executor;
pub mod commands;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use types::{BackupError, CopyOutcome, SourcePath};
pub use config::Config;
pub use commands::BackupSummary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
