//! Replace-then-copy of a single item

use super::{emit_event, BackupCallback, BackupEvent};
use crate::types::{BackupError, CopyOutcome};
use filetime::FileTime;
use ignore::WalkBuilder;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;

/// Copy `src` to `dest`, replacing whatever is already at `dest`
///
/// 1. Remove the old destination (file, symlink, or whole directory tree)
/// 2. Copy a directory recursively, or a single file
/// 3. Preserve mtime best-effort
///
/// A permission denial on the item itself (copying a file, or reading a
/// source directory) is not an error: it comes back as
/// [`CopyOutcome::Locked`] and the old destination stays deleted.
///
/// # Errors
/// Any other IO failure is returned and should end the run. This includes a
/// missing `src`, a failure while removing the old destination, and any
/// failure below the top level of a directory copy, permission denials
/// included. Anything already copied from a directory is left in place.
///
/// # Example
/// ```no_run
/// use quick_backups::executor::copy_item;
/// use std::path::Path;
///
/// let outcome = copy_item(
///     Path::new("/data/notes.txt"),
///     Path::new("/backup/notes.txt"),
///     None,
/// )?;
/// assert!(outcome.is_copied());
/// # Ok::<(), quick_backups::BackupError>(())
/// ```
pub fn copy_item(
    src: &Path,
    dest: &Path,
    on_event: Option<&BackupCallback>,
) -> Result<CopyOutcome, BackupError> {
    emit_event(
        on_event,
        BackupEvent::ItemStart {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        },
    );

    if remove_existing(dest)? {
        emit_event(
            on_event,
            BackupEvent::RemovedOld {
                dest: dest.to_path_buf(),
            },
        );
    }

    let copied = if src.is_dir() {
        // dest is only created once the source root is known to be readable
        match fs::read_dir(src) {
            Ok(_) => Ok(copy_tree(src, dest)?),
            Err(e) => Err(BackupError::io(src, e)),
        }
    } else {
        copy_file(src, dest)
    };

    settle(src, dest, copied, on_event)
}

/// Turn the result of the copy step into an outcome and emit its event
fn settle(
    src: &Path,
    dest: &Path,
    copied: Result<u64, BackupError>,
    on_event: Option<&BackupCallback>,
) -> Result<CopyOutcome, BackupError> {
    match copied {
        Ok(bytes) => {
            tracing::debug!("Copied {:?} -> {:?} ({} bytes)", src, dest, bytes);
            emit_event(
                on_event,
                BackupEvent::ItemCopied {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    bytes,
                },
            );
            Ok(CopyOutcome::Copied { bytes })
        }
        Err(err) => {
            let reason = locked_reason(err)?;
            tracing::debug!("Permission denied copying {:?}: {}", src, reason);
            emit_event(
                on_event,
                BackupEvent::ItemLocked {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: reason.clone(),
                },
            );
            Ok(CopyOutcome::Locked { reason })
        }
    }
}

/// Remove any filesystem entry at `path` without following a symlink there.
///
/// Returns whether something was removed.
pub fn remove_existing(path: &Path) -> Result<bool, BackupError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(BackupError::io(path, e)),
    };

    if metadata.file_type().is_dir() {
        fs::remove_dir_all(path).map_err(|e| BackupError::io(path, e))?;
    } else {
        fs::remove_file(path).map_err(|e| BackupError::io(path, e))?;
    }
    tracing::debug!("Removed old backup {:?}", path);
    Ok(true)
}

/// Split a copy failure into the recoverable permission case and the rest
fn locked_reason(err: BackupError) -> Result<String, BackupError> {
    match err {
        BackupError::Io { source, .. } if source.kind() == ErrorKind::PermissionDenied => {
            Ok(source.to_string())
        }
        other => Err(other),
    }
}

fn copy_file(src: &Path, dest: &Path) -> Result<u64, BackupError> {
    // fs::copy carries the permission bits over
    let bytes = fs::copy(src, dest).map_err(|e| BackupError::io(src, e))?;
    preserve_mtime(src, dest);
    Ok(bytes)
}

fn preserve_mtime(src: &Path, dest: &Path) {
    let result = fs::metadata(src)
        .and_then(|metadata| metadata.modified())
        .and_then(|mtime| filetime::set_file_mtime(dest, FileTime::from_system_time(mtime)));
    if let Err(e) = result {
        tracing::debug!("Could not preserve mtime on {:?}: {}", dest, e);
    }
}

/// Recursively copy the directory `src` to a fresh `dest`, following symlinks
fn copy_tree(src: &Path, dest: &Path) -> Result<u64, BackupError> {
    let walker = WalkBuilder::new(src)
        .standard_filters(false)
        .follow_links(true)
        .build();

    let mut total_bytes = 0u64;
    for result in walker {
        let entry = result.map_err(|e| BackupError::io(src, walk_error_to_io(e)))?;
        let relative = entry.path().strip_prefix(src).map_err(|_| {
            BackupError::io(
                entry.path(),
                Error::other(format!("entry escaped source tree {}", src.display())),
            )
        })?;
        let target = dest.join(relative);

        match entry.file_type() {
            Some(ft) if ft.is_dir() => {
                fs::create_dir_all(&target).map_err(|e| BackupError::io(&target, e))?;
            }
            Some(ft) if ft.is_file() => {
                total_bytes += copy_file(entry.path(), &target)?;
            }
            _ => {
                tracing::debug!("Skipping special file {:?}", entry.path());
            }
        }
    }

    Ok(total_bytes)
}

fn walk_error_to_io(err: ignore::Error) -> Error {
    let message = err.to_string();
    err.into_io_error().unwrap_or_else(|| Error::other(message))
}
