//! `fob-html` entry point: argument parsing, logging, command dispatch.

use clap::Parser;
use fob_html_cli::{cli, commands, error, logger};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Transform(transform_args) => commands::transform_execute(transform_args),
        cli::Command::Externals(externals_args) => commands::externals_execute(externals_args),
    };

    result.map_err(error::cli_error_to_miette)
}
