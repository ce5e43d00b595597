//! Top-level commands

pub mod backup;

pub use backup::{run, BackupSummary};
