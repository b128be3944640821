//! Command implementations for the `fob-html` CLI.
//!
//! - [`transform`] - Run the plugin lifecycle over an HTML file
//! - [`externals`] - Print production externals

pub mod externals;
pub mod transform;

pub use externals::execute as externals_execute;
pub use transform::execute as transform_execute;

use fob_html::PluginHost;
use fob_plugin_import_map::ImportMapPlugin;
use fob_plugin_version::{VersionFilePlugin, VersionLogPlugin};

use crate::config::HtmlConfig;

/// Register the plugins enabled by `config`.
pub fn build_host(config: &HtmlConfig) -> PluginHost {
    let mut host = PluginHost::new();
    host.add(ImportMapPlugin::new(config.import_map.clone()));
    if config.version.emit.inline() {
        host.add(VersionLogPlugin::new(config.version.log_options()));
    }
    if config.version.emit.file() {
        host.add(VersionFilePlugin::new(config.version.file_options()));
    }
    host
}
