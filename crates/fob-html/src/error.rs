//! Error types shared by fob HTML plugins

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::env::BuildCommand;

pub type Result<T> = std::result::Result<T, HtmlPluginError>;

/// Errors raised by plugin lifecycle hooks
#[derive(Error, Debug, Diagnostic)]
pub enum HtmlPluginError {
    /// A markup or build-end hook ran before `configure`
    #[error("plugin '{plugin}' was used before the build command was resolved")]
    #[diagnostic(
        code(fob::html::not_configured),
        help("Call `configure` with the host's ConfigEnv before transforming markup")
    )]
    NotConfigured { plugin: String },

    /// `configure` was called again with a different command
    #[error("plugin '{plugin}' is configured for `{recorded}` and cannot switch to `{requested}`")]
    #[diagnostic(code(fob::html::mode_conflict))]
    ModeConflict {
        plugin: String,
        recorded: BuildCommand,
        requested: BuildCommand,
    },

    /// JSON serialization of a generated payload failed
    #[error("failed to serialize {what}: {source}")]
    #[diagnostic(code(fob::html::serialize))]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// package.json could not be read or parsed
    #[error("failed to read package manifest {}: {message}", .path.display())]
    #[diagnostic(
        code(fob::html::manifest),
        help("Check that package.json exists and is valid JSON")
    )]
    Manifest { path: PathBuf, message: String },
}

impl HtmlPluginError {
    pub fn not_configured(plugin: impl Into<String>) -> Self {
        Self::NotConfigured {
            plugin: plugin.into(),
        }
    }

    pub fn mode_conflict(
        plugin: impl Into<String>,
        recorded: BuildCommand,
        requested: BuildCommand,
    ) -> Self {
        Self::ModeConflict {
            plugin: plugin.into(),
            recorded,
            requested,
        }
    }

    pub fn serialize(what: &'static str, source: serde_json::Error) -> Self {
        Self::Serialize { what, source }
    }

    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}
