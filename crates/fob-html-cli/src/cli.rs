//! Command-line interface definition for `fob-html`.
//!
//! - `fob-html transform` - Run the configured plugins over an HTML file
//! - `fob-html externals` - Print the specifiers a production build leaves unbundled

use clap::{Args, Parser, Subcommand, ValueEnum};
use fob_html::BuildCommand;
use std::path::PathBuf;

/// fob-html - import map and version stamping for index.html
#[derive(Parser, Debug)]
#[command(
    name = "fob-html",
    version,
    about = "Run fob HTML plugins over an index.html",
    long_about = "Applies the import map and version plugins to an HTML entry file\n\
                  the way a bundler host would: configure, transform the markup, then\n\
                  emit build assets such as version.json."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Transform an HTML file
    ///
    /// Runs configure, transform and build-end on every enabled plugin.
    /// The page goes to --out (or --out-dir), otherwise to stdout.
    Transform(TransformArgs),

    /// Print the production external list as JSON
    Externals(ExternalsArgs),
}

/// Build command the plugins are configured for
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum Mode {
    /// Production build: externals, import map, version stamp
    #[default]
    #[value(name = "build")]
    Build,

    /// Dev server: stylesheets only
    #[value(name = "serve")]
    Serve,
}

impl From<Mode> for BuildCommand {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Build => BuildCommand::Build,
            Mode::Serve => BuildCommand::Serve,
        }
    }
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// HTML file to transform
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Config file (defaults to fob-html.toml or fob-html.json in the
    /// current directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "build")]
    pub mode: Mode,

    /// Write the transformed page here
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Directory for emitted files; the page is written here too unless
    /// --out is given
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Package version to stamp, in place of `npm_package_version`
    #[arg(long, value_name = "VERSION")]
    pub package_version: Option<String>,

    /// Report the build as failed to the plugins
    #[arg(long)]
    pub fail: bool,
}

#[derive(Args, Debug)]
pub struct ExternalsArgs {
    /// Config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
