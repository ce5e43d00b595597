//! Console output and diagnostics

mod reporter;

pub use reporter::{render_event, ConsoleReporter};

use tracing::Level;

/// Install the stderr diagnostics subscriber
///
/// Progress lines go to stdout through [`ConsoleReporter`]; diagnostics
/// go to stderr at WARN, or DEBUG when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
