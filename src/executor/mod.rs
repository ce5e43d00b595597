//! Executor module for backup operations

pub mod copy;

use crate::commands::BackupSummary;
use crate::types::{BackupError, CopyOutcome, SourcePath};
use std::fs;
use std::path::{Path, PathBuf};

pub use copy::{copy_item, remove_existing};

/// Per-entry tallies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStats {
    /// Items copied completely
    pub copied: usize,
    /// Items that hit a permission denial
    pub locked: usize,
    /// Children skipped through `exceptions`
    pub skipped: usize,
    /// Bytes written by copied items
    pub bytes_copied: u64,
}

impl EntryStats {
    fn record(&mut self, outcome: &CopyOutcome) {
        match outcome {
            CopyOutcome::Copied { bytes } => {
                self.copied += 1;
                self.bytes_copied += bytes;
            }
            CopyOutcome::Locked { .. } => self.locked += 1,
        }
    }
}

/// Events emitted while a backup runs.
#[derive(Debug, Clone)]
pub enum BackupEvent {
    /// Run started with this many configured entries.
    RunStart { entries: usize },
    /// A configured entry is about to be processed.
    EntryStart { name: String, path: PathBuf },
    /// One item is about to be copied.
    ItemStart { src: PathBuf, dest: PathBuf },
    /// A previous backup at `dest` was deleted.
    RemovedOld { dest: PathBuf },
    /// Item copied.
    ItemCopied { src: PathBuf, dest: PathBuf, bytes: u64 },
    /// Item failed with a permission denial; the run continues.
    ItemLocked {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },
    /// A child listed in `exceptions` was skipped.
    Skipped { name: String, path: PathBuf },
    /// Every entry was processed.
    RunComplete { summary: BackupSummary },
}

/// Optional callback used to receive backup events.
pub type BackupCallback = dyn Fn(&BackupEvent) + Send + Sync;

/// Back up one configured entry into `backup_root`
///
/// Folder entries copy each immediate child to `backup_root/<child>`;
/// anything else is copied wholesale to `backup_root/<basename>`.
pub fn backup_entry(
    source: &SourcePath,
    backup_root: &Path,
    on_event: Option<&BackupCallback>,
) -> Result<EntryStats, BackupError> {
    if source.is_dir {
        return copy_directory_contents(source, backup_root, on_event);
    }

    let name = source
        .file_name()
        .ok_or_else(|| BackupError::InvalidSource {
            path: source.path.clone(),
        })?;
    let outcome = copy_item(&source.path, &backup_root.join(name), on_event)?;

    let mut stats = EntryStats::default();
    stats.record(&outcome);
    Ok(stats)
}

/// Copy the immediate children of a folder entry, skipping its exceptions
///
/// Children are visited in directory listing order. Subdirectories are
/// copied whole by [`copy_item`].
pub fn copy_directory_contents(
    source: &SourcePath,
    backup_root: &Path,
    on_event: Option<&BackupCallback>,
) -> Result<EntryStats, BackupError> {
    let mut stats = EntryStats::default();
    let children = fs::read_dir(&source.path).map_err(|e| BackupError::io(&source.path, e))?;

    for child in children {
        let child = child.map_err(|e| BackupError::io(&source.path, e))?;
        let file_name = child.file_name();

        if source.is_excluded(&file_name) {
            stats.skipped += 1;
            emit_event(
                on_event,
                BackupEvent::Skipped {
                    name: file_name.to_string_lossy().into_owned(),
                    path: child.path(),
                },
            );
            continue;
        }

        let outcome = copy_item(&child.path(), &backup_root.join(&file_name), on_event)?;
        stats.record(&outcome);
    }

    Ok(stats)
}

pub(crate) fn emit_event(on_event: Option<&BackupCallback>, event: BackupEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}
