//! Core type definitions for quick-backups

mod error;
mod outcome;
mod source;

pub use error::BackupError;
pub use outcome::CopyOutcome;
pub use source::SourcePath;
pub(crate) use source::SourcePathAttributes;
