//! Version stamping plugins for fob
//!
//! Two ways to make the deployed version visible:
//!
//! - [`VersionLogPlugin`] appends an inline script that logs
//!   `<prefix> <version>` to the browser console when the page loads.
//! - [`VersionFilePlugin`] writes a `version.json` asset next to the build
//!   output, for deploy checks and cache busting.
//!
//! Both act on production builds only. The version is the explicit option
//! when set, otherwise the package version the host exposes through
//! `npm_package_version` (see [`fob_html::ConfigEnv::from_process`]).
//!
//! ```rust
//! use fob_html::{BuildCommand, ConfigEnv, HtmlPlugin};
//! use fob_plugin_version::{VersionLogOptions, VersionLogPlugin};
//!
//! let plugin = VersionLogPlugin::new(VersionLogOptions::new().with_log_prefix("shop"));
//! plugin
//!     .configure(&ConfigEnv::new(BuildCommand::Build).with_package_version(Some("1.8.0".into())))
//!     .unwrap();
//!
//! assert_eq!(plugin.script_body().unwrap(), r#"console.log("shop","1.8.0");"#);
//! ```

mod file;
mod inline;
mod resolve;

pub use file::{FILE_PLUGIN_NAME, VersionFileOptions, VersionFilePlugin, VersionManifest};
pub use inline::{LOG_PLUGIN_NAME, VersionLogOptions, VersionLogPlugin};
pub use resolve::{FALLBACK_VERSION, package_version_from_manifest, resolve_version};
