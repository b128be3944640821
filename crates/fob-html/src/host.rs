//! Minimal host that drives HTML plugins through their lifecycle.
//!
//! Bundler integrations that have no native HTML pipeline (and the
//! `fob-html` CLI) use this to run plugins in order:
//!
//! ```text
//! configure(env) → transform_index_html(html) → build_end(outcome)
//! ```

use std::sync::Arc;
use tracing::{debug, info};

use crate::env::ConfigEnv;
use crate::error::Result;
use crate::inject::inject_tags;
use crate::plugin::{BuildOutcome, ConfigPatch, EmittedFile, HtmlPlugin};
use crate::tag::HtmlTag;

pub type SharedHtmlPlugin = Arc<dyn HtmlPlugin>;

/// Result of running every plugin's markup transform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexHtml {
    /// Final document with all tags injected
    pub html: String,
    /// Tags collected from plugins, in plugin order
    pub tags: Vec<HtmlTag>,
}

/// Ordered plugin container.
///
/// Plugins are stably sorted by [`enforce`](HtmlPlugin::enforce): `Pre`,
/// then `Normal`, then `Post`, keeping insertion order within a level.
#[derive(Debug, Default)]
pub struct PluginHost {
    plugins: Vec<SharedHtmlPlugin>,
}

impl PluginHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<P: HtmlPlugin + 'static>(&mut self, plugin: P) -> &mut Self {
        self.add_shared(Arc::new(plugin))
    }

    pub fn add_shared(&mut self, plugin: SharedHtmlPlugin) -> &mut Self {
        self.plugins.push(plugin);
        self.plugins.sort_by_key(|p| p.enforce());
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.name().into_owned()).collect()
    }

    /// Configure every plugin and merge the patches they return
    pub fn configure(&self, env: &ConfigEnv) -> Result<ConfigPatch> {
        let mut merged = ConfigPatch::default();
        for plugin in &self.plugins {
            if let Some(patch) = plugin.configure(env)? {
                debug!(
                    plugin = %plugin.name(),
                    external = patch.external.len(),
                    "plugin returned config patch"
                );
                merged.merge(patch);
            }
        }
        Ok(merged)
    }

    /// Run markup transforms in order, then inject the collected tags
    pub fn transform_index_html(&self, html: &str) -> Result<IndexHtml> {
        let mut current = html.to_string();
        let mut tags = Vec::new();
        for plugin in &self.plugins {
            let output = plugin.transform_markup(&current)?;
            debug!(
                plugin = %plugin.name(),
                tags = output.tags.len(),
                "markup transformed"
            );
            current = output.html;
            tags.extend(output.tags);
        }

        let html = inject_tags(&current, &tags);
        Ok(IndexHtml { html, tags })
    }

    /// Collect files emitted by plugins once the build has finished
    pub fn build_end(&self, outcome: &BuildOutcome) -> Result<Vec<EmittedFile>> {
        let mut files = Vec::new();
        for plugin in &self.plugins {
            let emitted = plugin.on_build_end(outcome)?;
            for file in &emitted {
                info!(plugin = %plugin.name(), file = %file.file_name, "emitting file");
            }
            files.extend(emitted);
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::BuildCommand;
    use crate::plugin::{Enforce, TransformOutput};
    use std::borrow::Cow;

    #[derive(Debug)]
    struct Tagger {
        name: &'static str,
        enforce: Enforce,
    }

    impl HtmlPlugin for Tagger {
        fn name(&self) -> Cow<'static, str> {
            self.name.into()
        }

        fn enforce(&self) -> Enforce {
            self.enforce
        }

        fn configure(&self, _env: &ConfigEnv) -> Result<Option<ConfigPatch>> {
            Ok(Some(ConfigPatch::external([self.name])))
        }

        fn transform_markup(&self, html: &str) -> Result<TransformOutput> {
            Ok(TransformOutput::with_tags(
                html,
                vec![HtmlTag::new("i").children(self.name)],
            ))
        }

        fn on_build_end(&self, outcome: &BuildOutcome) -> Result<Vec<EmittedFile>> {
            if !outcome.is_success() {
                return Ok(Vec::new());
            }
            Ok(vec![EmittedFile::asset(format!("{}.txt", self.name), "")])
        }
    }

    fn host() -> PluginHost {
        let mut host = PluginHost::new();
        host.add(Tagger {
            name: "post",
            enforce: Enforce::Post,
        })
        .add(Tagger {
            name: "normal",
            enforce: Enforce::Normal,
        })
        .add(Tagger {
            name: "pre",
            enforce: Enforce::Pre,
        });
        host
    }

    #[test]
    fn test_plugins_sorted_by_enforce() {
        assert_eq!(host().plugin_names(), vec!["pre", "normal", "post"]);
    }

    #[test]
    fn test_configure_merges_patches() {
        let patch = host()
            .configure(&ConfigEnv::new(BuildCommand::Build))
            .unwrap();
        assert_eq!(patch.external, vec!["pre", "normal", "post"]);
    }

    #[test]
    fn test_transform_collects_tags_in_order() {
        let out = host()
            .transform_index_html("<head></head>")
            .unwrap();
        assert_eq!(out.tags.len(), 3);
        assert_eq!(out.html, "<head><i>pre</i><i>normal</i><i>post</i></head>");
    }

    #[test]
    fn test_build_end_collects_files() {
        let files = host().build_end(&BuildOutcome::Success).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["pre.txt", "normal.txt", "post.txt"]);

        let failed = host()
            .build_end(&BuildOutcome::Failed("boom".into()))
            .unwrap();
        assert!(failed.is_empty());
    }
}
