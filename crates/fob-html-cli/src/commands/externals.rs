use fob_html::{BuildCommand, ConfigEnv};
use tracing::debug;

use crate::cli::ExternalsArgs;
use crate::commands::build_host;
use crate::config::HtmlConfig;
use crate::error::Result;

/// Print the specifiers a production build keeps external, as a JSON array.
pub fn execute(args: ExternalsArgs) -> Result<()> {
    let config = HtmlConfig::load(args.config.as_deref())?;
    let json = externals_json(&config)?;
    println!("{}", json);
    Ok(())
}

pub fn externals_json(config: &HtmlConfig) -> Result<String> {
    let host = build_host(config);
    let patch = host.configure(&ConfigEnv::new(BuildCommand::Build))?;
    debug!("{} external specifiers", patch.external.len());
    Ok(serde_json::to_string_pretty(&patch.external)?)
}
