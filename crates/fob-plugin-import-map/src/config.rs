//! Import map plugin configuration types
//!
//! A module is described by its bare specifier plus the CDN URLs of its
//! script and stylesheets:
//!
//! ```toml
//! [[modules]]
//! name = "element-plus"
//! path = "https://cdn.jsdelivr.net/npm/element-plus@2.3.8/dist/index.full.mjs"
//! css = [
//!     "https://cdn.jsdelivr.net/npm/element-plus@2.3.1/dist/index.min.css",
//!     "https://cdn.jsdelivr.net/npm/element-plus@2.3.1/theme-chalk/dark/css-vars.css",
//! ]
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Stylesheet field as users write it: one URL or a list of URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssSource {
    One(String),
    Many(Vec<String>),
}

impl CssSource {
    /// Flatten into a list. An empty single URL contributes nothing; list
    /// entries are kept as written.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            CssSource::One(url) if url.is_empty() => Vec::new(),
            CssSource::One(url) => vec![url],
            CssSource::Many(urls) => urls,
        }
    }
}

impl From<&str> for CssSource {
    fn from(url: &str) -> Self {
        CssSource::One(url.to_string())
    }
}

impl From<String> for CssSource {
    fn from(url: String) -> Self {
        CssSource::One(url)
    }
}

impl From<Vec<String>> for CssSource {
    fn from(urls: Vec<String>) -> Self {
        CssSource::Many(urls)
    }
}

impl From<Vec<&str>> for CssSource {
    fn from(urls: Vec<&str>) -> Self {
        CssSource::Many(urls.into_iter().map(str::to_string).collect())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let source = Option::<CssSource>::deserialize(deserializer)?;
    Ok(source.map(CssSource::into_vec).unwrap_or_default())
}

/// A module served from outside the bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Bare specifier, as imported in source (`"vue"`, `"@vue/devtools-api"`)
    pub name: String,

    /// URL of the ES module to map the specifier to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Stylesheet URLs, normalized to a list
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub css: Vec<String>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            css: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_css(mut self, css: impl Into<CssSource>) -> Self {
        self.css = css.into().into_vec();
        self
    }
}

fn default_css_serve() -> bool {
    true
}

/// Options for [`ImportMapPlugin`](crate::ImportMapPlugin)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMapOptions {
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,

    /// Link CDN stylesheets while serving in development as well
    ///
    /// Defaults to `true`. Production builds always link them.
    #[serde(default = "default_css_serve", alias = "cssServe")]
    pub css_serve: bool,
}

impl Default for ImportMapOptions {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            css_serve: default_css_serve(),
        }
    }
}

impl ImportMapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(mut self, module: ModuleDescriptor) -> Self {
        self.modules.push(module);
        self
    }

    pub fn modules(mut self, modules: impl IntoIterator<Item = ModuleDescriptor>) -> Self {
        self.modules.extend(modules);
        self
    }

    pub fn with_css_serve(mut self, enabled: bool) -> Self {
        self.css_serve = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_accepts_string_or_list() {
        let modules: Vec<ModuleDescriptor> = serde_json::from_str(
            r#"[
                {"name": "a", "path": "/a.js", "css": "a.css"},
                {"name": "b", "css": ["b1.css", "b2.css"]},
                {"name": "c"}
            ]"#,
        )
        .unwrap();

        assert_eq!(modules[0].css, vec!["a.css"]);
        assert_eq!(modules[1].css, vec!["b1.css", "b2.css"]);
        assert_eq!(modules[1].path, None);
        assert!(modules[2].css.is_empty());
    }

    #[test]
    fn test_empty_single_css_is_dropped() {
        let module: ModuleDescriptor =
            serde_json::from_str(r#"{"name": "a", "css": ""}"#).unwrap();
        assert!(module.css.is_empty());

        let module: ModuleDescriptor =
            serde_json::from_str(r#"{"name": "a", "css": null}"#).unwrap();
        assert!(module.css.is_empty());
    }

    #[test]
    fn test_css_serve_defaults_to_true() {
        let options: ImportMapOptions = serde_json::from_str(r#"{"modules": []}"#).unwrap();
        assert!(options.css_serve);
        assert!(ImportMapOptions::default().css_serve);
    }

    #[test]
    fn test_css_serve_camel_case_alias() {
        let options: ImportMapOptions = serde_json::from_str(r#"{"cssServe": false}"#).unwrap();
        assert!(!options.css_serve);
    }

    #[test]
    fn test_builder() {
        let options = ImportMapOptions::new()
            .module(
                ModuleDescriptor::new("vue")
                    .with_path("https://cdn.example.com/vue.js")
                    .with_css(vec!["x.css", "y.css"]),
            )
            .with_css_serve(false);
        assert_eq!(options.modules.len(), 1);
        assert_eq!(options.modules[0].css.len(), 2);
        assert!(!options.css_serve);
    }
}
