//! `fob-html` - run fob HTML plugins without a bundler.
//!
//! The binary plays the part of a bundler host for one HTML entry file: it
//! loads `fob-html.toml`, registers the import map and version plugins on a
//! [`fob_html::PluginHost`], then runs configure, markup transform and build
//! end in that order.
//!
//! - [`cli`] - clap definitions
//! - [`config`] - figment-based config loading
//! - [`commands`] - `transform` and `externals`
//! - [`error`] - `CliError` and miette conversion
//! - [`logger`] - tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

pub use config::{HtmlConfig, VersionConfig, VersionEmit};
pub use error::{CliError, ConfigError, Result, ResultExt};
