//! Import map plugin for fob
//!
//! Serves selected dependencies from a CDN instead of bundling them. In a
//! production build the plugin:
//!
//! - asks the host to treat every mapped specifier as external
//! - injects a `<script type="importmap">` so browsers resolve those
//!   specifiers to their CDN URLs at runtime
//! - links the modules' CDN stylesheets
//!
//! While serving in development modules are resolved by the dev server, so
//! only the stylesheets are linked (unless `css_serve` is turned off).
//!
//! ## Architecture
//!
//! ```text
//! ImportMapOptions → ImportMapPlugin::new → { ImportMap, stylesheets }
//!                                                 ↓
//! configure(build)  → ConfigPatch { external: [specifiers] }
//! transform_markup  → [<link rel=stylesheet>..., <script type=importmap>]
//! resolve_id        → external for mapped specifiers (rolldown)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use fob_html::{BuildCommand, ConfigEnv, HtmlPlugin};
//! use fob_plugin_import_map::{ImportMapOptions, ImportMapPlugin, ModuleDescriptor};
//!
//! let plugin = ImportMapPlugin::new(
//!     ImportMapOptions::new()
//!         .module(
//!             ModuleDescriptor::new("vue")
//!                 .with_path("https://cdn.jsdelivr.net/npm/vue@3.3.4/dist/vue.esm-browser.js"),
//!         )
//!         .module(
//!             ModuleDescriptor::new("element-plus")
//!                 .with_path("https://cdn.jsdelivr.net/npm/element-plus@2.3.8/dist/index.full.mjs")
//!                 .with_css("https://cdn.jsdelivr.net/npm/element-plus@2.3.1/dist/index.min.css"),
//!         ),
//! );
//!
//! let patch = plugin.configure(&ConfigEnv::new(BuildCommand::Build)).unwrap();
//! assert_eq!(patch.unwrap().external, vec!["vue", "element-plus"]);
//!
//! let output = plugin.transform_markup("<head></head>").unwrap();
//! assert_eq!(output.tags.len(), 2);
//! ```

use fob_html::{
    BuildModeSlot, ConfigEnv, ConfigPatch, HtmlPlugin, HtmlTag, Result, TransformOutput,
};
use std::borrow::Cow;
use tracing::debug;

mod config;
mod import_map;
mod resolve;

pub use config::{CssSource, ImportMapOptions, ModuleDescriptor};
pub use import_map::{ImportMap, collect_stylesheets};

/// Plugin name reported to hosts
pub const PLUGIN_NAME: &str = "fob-import-map";

/// MIME type browsers recognise for import maps
pub const IMPORTMAP_TYPE: &str = "importmap";

/// Maps bare specifiers to CDN URLs and injects the matching tags.
///
/// Lookup tables are built once in [`new`](Self::new); the only later
/// write is the build command recorded by `configure`.
#[derive(Debug, Clone)]
pub struct ImportMapPlugin {
    import_map: ImportMap,
    stylesheets: Vec<String>,
    css_serve: bool,
    // an empty module list never produces an import map tag
    has_modules: bool,
    mode: BuildModeSlot,
}

impl ImportMapPlugin {
    pub fn new(options: ImportMapOptions) -> Self {
        let import_map = ImportMap::from_modules(&options.modules);
        let stylesheets = collect_stylesheets(&options.modules);
        debug!(
            "[fob-import-map] {} mapped modules, {} stylesheets",
            import_map.len(),
            stylesheets.len()
        );
        Self {
            import_map,
            stylesheets,
            css_serve: options.css_serve,
            has_modules: !options.modules.is_empty(),
            mode: BuildModeSlot::new(),
        }
    }

    pub fn import_map(&self) -> &ImportMap {
        &self.import_map
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn css_serve(&self) -> bool {
        self.css_serve
    }

    /// Specifiers a production build must leave unbundled
    pub fn externals(&self) -> Vec<String> {
        self.import_map.specifiers().map(str::to_string).collect()
    }

    /// Whether `specifier` resolves through the import map in this build
    pub fn is_external(&self, specifier: &str) -> bool {
        self.mode.is_build() && self.import_map.contains(specifier)
    }

    fn stylesheet_tags(&self) -> Vec<HtmlTag> {
        self.stylesheets.iter().map(HtmlTag::stylesheet).collect()
    }

    fn import_map_tag(&self) -> Result<HtmlTag> {
        Ok(HtmlTag::inline_script(IMPORTMAP_TYPE, self.import_map.to_json()?))
    }
}

impl HtmlPlugin for ImportMapPlugin {
    fn name(&self) -> Cow<'static, str> {
        PLUGIN_NAME.into()
    }

    fn configure(&self, env: &ConfigEnv) -> Result<Option<ConfigPatch>> {
        self.mode.record(PLUGIN_NAME, env.command)?;
        if !env.command.is_build() {
            return Ok(None);
        }
        debug!(
            "[fob-import-map] Externalizing {} modules for build",
            self.import_map.len()
        );
        Ok(Some(ConfigPatch::external(self.externals())))
    }

    fn transform_markup(&self, html: &str) -> Result<TransformOutput> {
        let is_build = self.mode.require(PLUGIN_NAME)?.is_build();

        let mut tags = if is_build || self.css_serve {
            self.stylesheet_tags()
        } else {
            Vec::new()
        };

        if is_build && self.has_modules {
            tags.push(self.import_map_tag()?);
        }

        Ok(TransformOutput::with_tags(html, tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fob_html::{BuildCommand, HtmlPluginError};

    fn sample_options() -> ImportMapOptions {
        ImportMapOptions::new()
            .module(ModuleDescriptor::new("a").with_path("/a.js").with_css("a.css"))
            .module(ModuleDescriptor::new("b").with_css(vec!["b1.css", "b2.css"]))
    }

    fn configured(options: ImportMapOptions, command: BuildCommand) -> ImportMapPlugin {
        let plugin = ImportMapPlugin::new(options);
        plugin.configure(&ConfigEnv::new(command)).unwrap();
        plugin
    }

    #[test]
    fn test_plugin_creation() {
        let plugin = ImportMapPlugin::new(sample_options());
        assert_eq!(HtmlPlugin::name(&plugin), "fob-import-map");
        assert_eq!(plugin.import_map().get("a"), Some("/a.js"));
        assert_eq!(plugin.stylesheets(), ["a.css", "b1.css", "b2.css"]);
        assert!(plugin.css_serve());
    }

    #[test]
    fn test_configure_build_returns_externals() {
        let plugin = ImportMapPlugin::new(sample_options());
        let patch = plugin
            .configure(&ConfigEnv::new(BuildCommand::Build))
            .unwrap()
            .unwrap();
        assert_eq!(patch.external, vec!["a"]);
        assert!(plugin.is_external("a"));
        assert!(!plugin.is_external("b"));
    }

    #[test]
    fn test_configure_serve_returns_nothing() {
        let plugin = ImportMapPlugin::new(sample_options());
        let patch = plugin.configure(&ConfigEnv::new(BuildCommand::Serve)).unwrap();
        assert!(patch.is_none());
        assert!(!plugin.is_external("a"));
    }

    #[test]
    fn test_transform_before_configure_fails() {
        let plugin = ImportMapPlugin::new(sample_options());
        let err = plugin.transform_markup("<head></head>").unwrap_err();
        assert!(matches!(err, HtmlPluginError::NotConfigured { .. }));
    }

    #[test]
    fn test_build_emits_links_then_importmap() {
        let plugin = configured(sample_options(), BuildCommand::Build);
        let output = plugin.transform_markup("<html></html>").unwrap();

        assert_eq!(output.html, "<html></html>");
        assert_eq!(output.tags.len(), 4);
        for (tag, href) in output.tags[..3].iter().zip(["a.css", "b1.css", "b2.css"]) {
            assert_eq!(tag.tag, "link");
            assert_eq!(tag.attrs.get("rel").map(String::as_str), Some("stylesheet"));
            assert_eq!(tag.attrs.get("href").map(String::as_str), Some(href));
        }

        let script = &output.tags[3];
        assert_eq!(script.tag, "script");
        assert_eq!(script.attrs.get("type").map(String::as_str), Some("importmap"));
        let body: serde_json::Value =
            serde_json::from_str(script.children.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"imports": {"a": "/a.js"}}));
    }

    #[test]
    fn test_serve_links_css_by_default() {
        let plugin = configured(sample_options(), BuildCommand::Serve);
        let output = plugin.transform_markup("").unwrap();
        assert_eq!(output.tags.len(), 3);
        assert!(output.tags.iter().all(|t| t.tag == "link"));
    }

    #[test]
    fn test_serve_without_css_serve_emits_nothing() {
        let plugin = configured(sample_options().with_css_serve(false), BuildCommand::Serve);
        assert!(plugin.transform_markup("").unwrap().tags.is_empty());
    }

    #[test]
    fn test_build_ignores_css_serve_flag() {
        let plugin = configured(sample_options().with_css_serve(false), BuildCommand::Build);
        assert_eq!(plugin.transform_markup("").unwrap().tags.len(), 4);
    }

    #[test]
    fn test_empty_modules() {
        let serve = configured(ImportMapOptions::new(), BuildCommand::Serve);
        assert!(serve.transform_markup("").unwrap().tags.is_empty());

        let build = configured(ImportMapOptions::new(), BuildCommand::Build);
        assert!(build.transform_markup("").unwrap().tags.is_empty());
    }

    #[test]
    fn test_css_only_modules_still_get_empty_import_map() {
        let plugin = configured(
            ImportMapOptions::new().module(ModuleDescriptor::new("theme").with_css("t.css")),
            BuildCommand::Build,
        );
        let tags = plugin.transform_markup("").unwrap().tags;
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].children.as_deref(), Some("{\n  \"imports\": {}\n}"));
    }

    #[test]
    fn test_transform_is_idempotent() {
        let plugin = configured(sample_options(), BuildCommand::Build);
        let first = plugin.transform_markup("<head></head>").unwrap();
        let second = plugin.transform_markup("<head></head>").unwrap();
        assert_eq!(first, second);
    }
}
