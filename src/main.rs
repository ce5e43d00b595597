use anyhow::Context;
use clap::Parser;
use quick_backups::config::Cli;
use quick_backups::executor::BackupEvent;
use quick_backups::ui::{init_logging, ConsoleReporter};
use quick_backups::{commands, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::try_from(&cli)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;

    let reporter = ConsoleReporter::new();
    let on_event = move |event: &BackupEvent| reporter.handle(event);

    let summary = commands::run(&config, Some(&on_event)).context("Backup aborted")?;
    tracing::debug!(
        "quick-backups v{}: {} entries, {} copied, {} locked, {} skipped, {} bytes",
        quick_backups::VERSION,
        summary.entries,
        summary.copied,
        summary.locked,
        summary.skipped,
        summary.bytes_copied
    );

    Ok(())
}
