//! The lifecycle contract between a host and an HTML plugin.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Debug;

use crate::env::ConfigEnv;
use crate::error::Result;
use crate::tag::HtmlTag;

/// Plugin ordering, mirroring Vite's `enforce` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Enforce {
    /// Runs before normal plugins
    Pre,
    #[default]
    Normal,
    /// Runs after normal plugins
    Post,
}

/// Build configuration changes requested by a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatch {
    /// Bare specifiers the host must leave unbundled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<String>,
}

impl ConfigPatch {
    pub fn external<I, S>(specifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut patch = Self::default();
        patch.extend_external(specifiers);
        patch
    }

    /// Append another patch, keeping first-seen order and dropping duplicates
    pub fn merge(&mut self, other: ConfigPatch) {
        self.extend_external(other.external);
    }

    pub fn is_empty(&self) -> bool {
        self.external.is_empty()
    }

    fn extend_external<I, S>(&mut self, specifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for specifier in specifiers {
            let specifier = specifier.into();
            if !self.external.contains(&specifier) {
                self.external.push(specifier);
            }
        }
    }
}

/// Result of a markup transform: the (possibly rewritten) HTML plus tags to inject
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutput {
    pub html: String,
    pub tags: Vec<HtmlTag>,
}

impl TransformOutput {
    /// Pass the HTML through untouched with no tags
    pub fn unchanged(html: &str) -> Self {
        Self {
            html: html.to_string(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(html: &str, tags: Vec<HtmlTag>) -> Self {
        Self {
            html: html.to_string(),
            tags,
        }
    }
}

/// Kind of file a plugin emits at build end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmittedFileKind {
    #[default]
    Asset,
}

/// A file a plugin asks the host to write alongside the build output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub file_name: String,
    pub source: String,
    pub kind: EmittedFileKind,
}

impl EmittedFile {
    pub fn asset(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
            kind: EmittedFileKind::Asset,
        }
    }
}

/// How the host's build finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    /// Upstream failure with the host's message
    Failed(String),
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

/// Lifecycle hooks a host calls on an HTML plugin.
///
/// Hosts call `configure` once the build command is known, `transform_markup`
/// for every HTML document, and `on_build_end` after the bundle is produced.
/// Every hook has a no-op default.
pub trait HtmlPlugin: Debug + Send + Sync {
    fn name(&self) -> Cow<'static, str>;

    fn enforce(&self) -> Enforce {
        Enforce::Normal
    }

    /// Record the build command; optionally return configuration changes
    fn configure(&self, _env: &ConfigEnv) -> Result<Option<ConfigPatch>> {
        Ok(None)
    }

    fn transform_markup(&self, html: &str) -> Result<TransformOutput> {
        Ok(TransformOutput::unchanged(html))
    }

    fn on_build_end(&self, _outcome: &BuildOutcome) -> Result<Vec<EmittedFile>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_merge_dedupes_in_order() {
        let mut patch = ConfigPatch::external(["vue", "dayjs"]);
        patch.merge(ConfigPatch::external(["dayjs", "lodash-es"]));
        assert_eq!(patch.external, vec!["vue", "dayjs", "lodash-es"]);
    }

    #[test]
    fn test_patch_serializes_external() {
        let patch = ConfigPatch::external(["vue"]);
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"external":["vue"]}"#
        );
        assert_eq!(serde_json::to_string(&ConfigPatch::default()).unwrap(), "{}");
    }

    #[test]
    fn test_enforce_ordering() {
        assert!(Enforce::Pre < Enforce::Normal);
        assert!(Enforce::Normal < Enforce::Post);
    }

    #[derive(Debug)]
    struct Noop;

    impl HtmlPlugin for Noop {
        fn name(&self) -> Cow<'static, str> {
            "noop".into()
        }
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let plugin = Noop;
        assert_eq!(
            plugin
                .configure(&ConfigEnv::new(crate::BuildCommand::Build))
                .unwrap(),
            None
        );
        let out = plugin.transform_markup("<p></p>").unwrap();
        assert_eq!(out, TransformOutput::unchanged("<p></p>"));
        assert!(plugin.on_build_end(&BuildOutcome::Success).unwrap().is_empty());
    }
}
