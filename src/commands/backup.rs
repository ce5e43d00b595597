//! Main backup command

use crate::executor::{backup_entry, emit_event, BackupCallback, BackupEvent, EntryStats};
use crate::types::BackupError;
use crate::Config;
use std::fs;

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupSummary {
    /// Configured entries processed
    pub entries: usize,
    /// Items copied completely
    pub copied: usize,
    /// Items that hit a permission denial
    pub locked: usize,
    /// Children skipped through `exceptions`
    pub skipped: usize,
    /// Bytes written
    pub bytes_copied: u64,
}

impl BackupSummary {
    fn add(&mut self, stats: &EntryStats) {
        self.entries += 1;
        self.copied += stats.copied;
        self.locked += stats.locked;
        self.skipped += stats.skipped;
        self.bytes_copied += stats.bytes_copied;
    }
}

/// Run the backup
///
/// Entries are processed one at a time in declaration order. A locked item
/// only counts against the summary; any other error stops the run and the
/// remaining entries are left untouched.
pub fn run(config: &Config, on_event: Option<&BackupCallback>) -> Result<BackupSummary, BackupError> {
    emit_event(
        on_event,
        BackupEvent::RunStart {
            entries: config.source_paths.len(),
        },
    );

    fs::create_dir_all(&config.backup_path)
        .map_err(|e| BackupError::io(&config.backup_path, e))?;

    let mut summary = BackupSummary::default();
    for source in &config.source_paths {
        emit_event(
            on_event,
            BackupEvent::EntryStart {
                name: source.name.clone(),
                path: source.path.clone(),
            },
        );

        let stats = backup_entry(source, &config.backup_path, on_event).map_err(|e| {
            tracing::debug!("Entry {:?} stopped the run at {:?}", source.name, e.path());
            e
        })?;
        tracing::debug!("Entry {:?} finished: {:?}", source.name, stats);
        summary.add(&stats);
    }

    emit_event(
        on_event,
        BackupEvent::RunComplete {
            summary: summary.clone(),
        },
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourcePath;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    fn config_for(backup: &Path, sources: Vec<SourcePath>) -> Config {
        Config {
            source_paths: sources,
            backup_path: backup.to_path_buf(),
        }
    }

    #[test]
    fn test_run_creates_backup_root() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let backup = dir.path().join("nested/backup");

        let summary = run(&config_for(&backup, vec![]), None).expect("empty run");
        assert!(backup.is_dir());
        assert_eq!(summary, BackupSummary::default());
    }

    #[test]
    fn test_run_entry_order_and_events() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let backup = dir.path().join("backup");
        fs::write(dir.path().join("b.txt"), b"b").expect("write b");
        fs::write(dir.path().join("a.txt"), b"a").expect("write a");

        let config = config_for(
            &backup,
            vec![
                SourcePath::new("second-file-first", dir.path().join("b.txt")),
                SourcePath::new("first-file-second", dir.path().join("a.txt")),
            ],
        );

        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_ref = Arc::clone(&seen);
        let callback = move |event: &BackupEvent| {
            let label = match event {
                BackupEvent::RunStart { entries } => format!("start:{entries}"),
                BackupEvent::EntryStart { name, .. } => format!("entry:{name}"),
                BackupEvent::RunComplete { summary } => format!("done:{}", summary.copied),
                _ => return,
            };
            seen_ref.lock().expect("lock seen").push(label);
        };

        let summary = run(&config, Some(&callback)).expect("run");
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.copied, 2);
        assert_eq!(summary.bytes_copied, 2);
        assert_eq!(
            *seen.lock().expect("lock seen"),
            vec![
                "start:2",
                "entry:second-file-first",
                "entry:first-file-second",
                "done:2"
            ]
        );
    }

    #[test]
    fn test_run_stops_at_fatal_error() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let backup = dir.path().join("backup");
        fs::write(dir.path().join("later.txt"), b"later").expect("write later");

        let config = config_for(
            &backup,
            vec![
                SourcePath::new("missing", dir.path().join("missing.txt")),
                SourcePath::new("later", dir.path().join("later.txt")),
            ],
        );

        let completed = Arc::new(Mutex::new(false));
        let completed_ref = Arc::clone(&completed);
        let callback = move |event: &BackupEvent| {
            if matches!(event, BackupEvent::RunComplete { .. }) {
                *completed_ref.lock().expect("lock completed") = true;
            }
        };

        let err = run(&config, Some(&callback)).unwrap_err();
        assert!(err.is_not_found());
        assert!(!backup.join("later.txt").exists());
        assert!(!*completed.lock().expect("lock completed"));
    }

    #[test]
    fn test_summary_add() {
        let mut summary = BackupSummary::default();
        summary.add(&EntryStats {
            copied: 3,
            locked: 1,
            skipped: 2,
            bytes_copied: 100,
        });
        summary.add(&EntryStats {
            copied: 1,
            locked: 0,
            skipped: 0,
            bytes_copied: 1,
        });
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.copied, 4);
        assert_eq!(summary.locked, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.bytes_copied, 101);
    }
}
