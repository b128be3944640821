//! Host contract for fob HTML plugins
//!
//! Bundler plugins that touch the generated `index.html` (stylesheet links,
//! import maps, version banners) share a small lifecycle:
//!
//! 1. [`HtmlPlugin::configure`] - the host reports whether it is running a
//!    production build; the plugin may ask for modules to stay external
//! 2. [`HtmlPlugin::transform_markup`] - the plugin returns [`HtmlTag`]s to
//!    splice into the document
//! 3. [`HtmlPlugin::on_build_end`] - the plugin may emit extra files
//!
//! [`PluginHost`] drives a list of plugins through those steps and
//! [`inject_tags`] performs the splicing for hosts without an HTML pipeline.
//!
//! ## Example
//!
//! ```rust
//! use fob_html::{BuildCommand, ConfigEnv, HtmlPlugin, HtmlTag, PluginHost, TransformOutput};
//! use std::borrow::Cow;
//!
//! #[derive(Debug)]
//! struct Favicon;
//!
//! impl HtmlPlugin for Favicon {
//!     fn name(&self) -> Cow<'static, str> {
//!         "favicon".into()
//!     }
//!
//!     fn transform_markup(&self, html: &str) -> fob_html::Result<TransformOutput> {
//!         let tag = HtmlTag::new("link").attr("rel", "icon").attr("href", "/favicon.svg");
//!         Ok(TransformOutput::with_tags(html, vec![tag]))
//!     }
//! }
//!
//! let mut host = PluginHost::new();
//! host.add(Favicon);
//! host.configure(&ConfigEnv::new(BuildCommand::Build)).unwrap();
//! let page = host.transform_index_html("<head></head>").unwrap();
//! assert_eq!(page.html, r#"<head><link rel="icon" href="/favicon.svg"></head>"#);
//! ```

pub mod env;
pub mod error;
pub mod host;
pub mod inject;
pub mod plugin;
pub mod tag;

#[cfg(feature = "logging")]
pub mod logging;

pub use env::{BuildCommand, BuildModeSlot, ConfigEnv, PACKAGE_VERSION_VAR};
pub use error::{HtmlPluginError, Result};
pub use host::{IndexHtml, PluginHost, SharedHtmlPlugin};
pub use inject::inject_tags;
pub use plugin::{
    BuildOutcome, ConfigPatch, EmittedFile, EmittedFileKind, Enforce, HtmlPlugin,
    TransformOutput,
};
pub use tag::{HtmlTag, InjectTo};

#[cfg(feature = "logging")]
pub use logging::{LogLevel, init_logging, init_logging_with_filter};
