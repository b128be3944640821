//! Logging setup for the `fob-html` binary.
//!
//! Logs go to stderr; stdout is reserved for the transformed page and the
//! externals JSON.

use fob_html::{LogLevel, init_logging_with_filter};
use tracing_subscriber::EnvFilter;

/// Plugin-crate directives for `level`, plus this binary's own target
fn directives(level: LogLevel) -> String {
    format!("{},fob_html_cli={}", level.directives(), level)
}

/// Build the filter for the global flags.
///
/// `--verbose` and `--quiet` win over `RUST_LOG`, which wins over the
/// default INFO level.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(directives(LogLevel::Debug))
    } else if quiet {
        EnvFilter::new(directives(LogLevel::Error))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directives(LogLevel::default())))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logging_with_filter(filter_for(verbose, quiet), no_color);
}
