//! Error types for the `fob-html` CLI.

use fob_html::HtmlPluginError;
use miette::Report;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised by a plugin hook
    #[error(transparent)]
    Plugin(#[from] HtmlPluginError),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `--fail` was passed; plugins saw a failed build
    #[error("Build reported as failed; no assets were emitted")]
    BuildFailed,

    #[error("{0}")]
    Custom(String),
}

/// Config file loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n\nHint: Create fob-html.toml or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported config format: {}\n\nHint: Use a .toml or .json file", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid configuration: {message}\n\nHint: Check field names and types in your config file and FOB_HTML_* variables")]
    Invalid { message: String },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach context to fallible operations.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

/// Convert a CLI error into a miette report for `main`.
///
/// Plugin errors already carry diagnostic codes and help text, so they are
/// reported as-is.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Plugin(e) => Report::new(e),
        other => miette::miette!("{}", other),
    }
}
