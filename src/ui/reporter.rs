//! Console progress lines

use crate::executor::BackupEvent;
use console::{style, Term};

/// Prints backup events to stdout, one record per event
pub struct ConsoleReporter {
    term: Term,
}

impl ConsoleReporter {
    /// Create a reporter writing to stdout
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Print the lines for one event.
    pub fn handle(&self, event: &BackupEvent) {
        if let Err(e) = self.term.write_line(&render_event(event)) {
            tracing::debug!("Failed to write progress line: {}", e);
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable text for an event
pub fn render_event(event: &BackupEvent) -> String {
    match event {
        BackupEvent::RunStart { .. } => style("#### QUICK BACKUPS ####").bold().to_string(),
        BackupEvent::EntryStart { name, .. } => {
            format!("\n{}", style(format!("## Backing up {name} ##")).cyan().bold())
        }
        BackupEvent::ItemStart { src, dest } => {
            format!("Source:{}\nDestination:{}", src.display(), dest.display())
        }
        BackupEvent::RemovedOld { dest } => format!("delete old backup {}", dest.display()),
        BackupEvent::ItemCopied { src, dest, .. } => {
            // Items always land directly in the backup root
            let root = dest.parent().unwrap_or(dest.as_path());
            style(format!(
                "  copied {} to dest: {}",
                src.display(),
                root.display()
            ))
            .green()
            .to_string()
        }
        BackupEvent::ItemLocked { reason, .. } => {
            style(format!("  Failed, {reason}! File may be locked/in use."))
                .red()
                .to_string()
        }
        BackupEvent::Skipped { name, .. } => {
            style(format!("Skipping {name}")).yellow().to_string()
        }
        BackupEvent::RunComplete { .. } => {
            format!("\n{}", style("#### SUCCESS! ####").green().bold())
        }
    }
}
