use indexmap::IndexMap;
use serde::Serialize;

use fob_html::{HtmlPluginError, Result};

use crate::config::ModuleDescriptor;

/// Specifier → URL table, serialized as `{"imports": {...}}`.
///
/// Keeps insertion order. Re-inserting a specifier replaces its URL but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportMap {
    imports: IndexMap<String, String>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every module that has a non-empty name and script path
    pub fn from_modules<'a>(modules: impl IntoIterator<Item = &'a ModuleDescriptor>) -> Self {
        let mut map = Self::new();
        for module in modules {
            match module.path.as_deref() {
                Some(path) if !path.is_empty() && !module.name.is_empty() => {
                    map.insert(module.name.as_str(), path);
                }
                _ => {}
            }
        }
        map
    }

    pub fn insert(&mut self, specifier: impl Into<String>, path: impl Into<String>) {
        self.imports.insert(specifier.into(), path.into());
    }

    pub fn get(&self, specifier: &str) -> Option<&str> {
        self.imports.get(specifier).map(String::as_str)
    }

    pub fn contains(&self, specifier: &str) -> bool {
        self.imports.contains_key(specifier)
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn as_map(&self) -> &IndexMap<String, String> {
        &self.imports
    }

    /// Specifiers in insertion order
    pub fn specifiers(&self) -> impl Iterator<Item = &str> {
        self.imports.keys().map(String::as_str)
    }

    /// Pretty JSON with 2-space indentation, the body of the importmap script
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HtmlPluginError::serialize("import map", e))
    }
}

/// Flatten every module's stylesheets, in module order then list order
pub fn collect_stylesheets<'a>(modules: impl IntoIterator<Item = &'a ModuleDescriptor>) -> Vec<String> {
    modules
        .into_iter()
        .flat_map(|module| module.css.iter().cloned())
        .collect()
}
