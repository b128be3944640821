//! Console banner variant: logs the version from the built page.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

use fob_html::{
    BuildModeSlot, ConfigEnv, ConfigPatch, Enforce, HtmlPlugin, HtmlPluginError, HtmlTag, Result,
    TransformOutput,
};

use crate::resolve::resolve_version;

pub const LOG_PLUGIN_NAME: &str = "fob-version-log";

/// JavaScript token logged when no version could be resolved
const UNDEFINED_TOKEN: &str = "undefined";

fn default_log_prefix() -> String {
    "front version".to_string()
}

/// Options for [`VersionLogPlugin`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionLogOptions {
    /// Label logged before the version
    #[serde(default = "default_log_prefix", alias = "logPrefix")]
    pub log_prefix: String,

    /// Explicit version; overrides the package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for VersionLogOptions {
    fn default() -> Self {
        Self {
            log_prefix: default_log_prefix(),
            version: None,
        }
    }
}

impl VersionLogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = prefix.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Appends `console.log("<prefix>", "<version>")` to production pages.
///
/// Runs after other plugins and does nothing while serving.
#[derive(Debug, Clone)]
pub struct VersionLogPlugin {
    options: VersionLogOptions,
    mode: BuildModeSlot,
    // inner `None`: resolved, but neither source had a version
    version: OnceCell<Option<String>>,
}

impl VersionLogPlugin {
    pub fn new(options: VersionLogOptions) -> Self {
        Self {
            options,
            mode: BuildModeSlot::new(),
            version: OnceCell::new(),
        }
    }

    pub fn options(&self) -> &VersionLogOptions {
        &self.options
    }

    /// Version resolved at configure time; `None` before `configure` or when
    /// neither source provided one
    pub fn version(&self) -> Option<&str> {
        self.version.get().and_then(|v| v.as_deref())
    }

    /// Inline script body for the resolved version
    pub fn script_body(&self) -> Result<String> {
        let prefix = serde_json::to_string(&self.options.log_prefix)
            .map_err(|e| HtmlPluginError::serialize("log prefix", e))?;
        let version = match self.version() {
            Some(version) => serde_json::to_string(version)
                .map_err(|e| HtmlPluginError::serialize("version", e))?,
            None => UNDEFINED_TOKEN.to_string(),
        };
        Ok(format!("console.log({},{});", prefix, version))
    }
}

impl Default for VersionLogPlugin {
    fn default() -> Self {
        Self::new(VersionLogOptions::default())
    }
}

impl HtmlPlugin for VersionLogPlugin {
    fn name(&self) -> Cow<'static, str> {
        LOG_PLUGIN_NAME.into()
    }

    fn enforce(&self) -> Enforce {
        Enforce::Post
    }

    fn configure(&self, env: &ConfigEnv) -> Result<Option<ConfigPatch>> {
        self.mode.record(LOG_PLUGIN_NAME, env.command)?;
        let resolved = resolve_version(
            self.options.version.as_deref(),
            env.package_version.as_deref(),
        );
        let resolved = self.version.get_or_init(|| resolved);
        debug!(
            "[fob-version-log] Resolved version {:?} for {}",
            resolved, env.command
        );
        Ok(None)
    }

    fn transform_markup(&self, html: &str) -> Result<TransformOutput> {
        if !self.mode.require(LOG_PLUGIN_NAME)?.is_build() {
            return Ok(TransformOutput::unchanged(html));
        }

        let tag = HtmlTag::inline_script("text/javascript", self.script_body()?);
        Ok(TransformOutput::with_tags(html, vec![tag]))
    }
}
