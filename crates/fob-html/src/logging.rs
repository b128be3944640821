//! Subscriber setup for applications embedding fob HTML plugins
//!
//! Only available with the `logging` feature. Libraries should not call
//! this; the plugins emit `tracing` events and leave subscriber choice to
//! the host.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Crates whose events the default filter targets
const PLUGIN_TARGETS: &[&str] = &["fob_html", "fob_plugin_import_map", "fob_plugin_version"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Silent,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Filter directives scoping this level to the plugin crates
    pub fn directives(&self) -> String {
        PLUGIN_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "trace" => Ok(LogLevel::Debug),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install a global subscriber for plugin events.
///
/// `RUST_LOG` takes precedence over `level` when set. Only the first call in
/// a process has an effect.
pub fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directives()));
    init_logging_with_filter(filter, false);
}

/// Install a global subscriber with a caller-built filter.
///
/// Events go to stderr so stdout stays free for tool output. Shares the
/// once-only guard with [`init_logging`].
pub fn init_logging_with_filter(filter: EnvFilter, no_color: bool) {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .with_ansi(!no_color)
            .without_time()
            .compact();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("OFF".parse::<LogLevel>().unwrap(), LogLevel::Silent);
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_directives_cover_plugin_crates() {
        assert_eq!(
            LogLevel::Debug.directives(),
            "fob_html=debug,fob_plugin_import_map=debug,fob_plugin_version=debug"
        );
        assert_eq!(LogLevel::Silent.to_string(), "off");
    }
}
