//! Asset variant: writes `version.json` next to the build output.
//!
//! ## Why two entry points?
//!
//! Hosts driving the [`HtmlPlugin`] lifecycle get the file from
//! `on_build_end`. Inside a rolldown build the same asset is pushed into the
//! bundle from `generate_bundle`, which rolldown only reaches when the build
//! succeeded.

use once_cell::sync::OnceCell;
use rolldown_common::{Output, OutputAsset};
use rolldown_plugin::{HookGenerateBundleArgs, HookNoopReturn, HookUsage, Plugin, PluginContext};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info};

use fob_html::{
    BuildCommand, BuildModeSlot, BuildOutcome, ConfigEnv, ConfigPatch, EmittedFile, HtmlPlugin,
    HtmlPluginError, Result,
};

use crate::resolve::{FALLBACK_VERSION, resolve_version};

pub const FILE_PLUGIN_NAME: &str = "fob-version-file";

fn default_file_name() -> String {
    "version.json".to_string()
}

/// Options for [`VersionFilePlugin`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFileOptions {
    /// Output file name, relative to the output directory
    #[serde(default = "default_file_name", alias = "fileName")]
    pub file_name: String,

    /// Explicit version; overrides the package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for VersionFileOptions {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            version: None,
        }
    }
}

impl VersionFileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Contents of the emitted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionManifest {
    pub version: String,
}

/// Emits `{"version": "<v>"}` after successful production builds
#[derive(Debug, Clone)]
pub struct VersionFilePlugin {
    options: VersionFileOptions,
    mode: BuildModeSlot,
    version: OnceCell<String>,
}

impl VersionFilePlugin {
    pub fn new(options: VersionFileOptions) -> Self {
        Self {
            options,
            mode: BuildModeSlot::new(),
            version: OnceCell::new(),
        }
    }

    pub fn options(&self) -> &VersionFileOptions {
        &self.options
    }

    /// Version resolved at configure time
    pub fn version(&self) -> Option<&str> {
        self.version.get().map(String::as_str)
    }

    fn resolve(&self, package_version: Option<&str>) -> String {
        resolve_version(self.options.version.as_deref(), package_version)
            .unwrap_or_else(|| FALLBACK_VERSION.to_string())
    }

    /// Serialized manifest for `version`
    pub fn render(version: &str) -> Result<String> {
        let manifest = VersionManifest {
            version: version.to_string(),
        };
        serde_json::to_string(&manifest).map_err(|e| HtmlPluginError::serialize("version manifest", e))
    }

    fn emitted_file(&self, version: &str) -> Result<EmittedFile> {
        Ok(EmittedFile::asset(
            self.options.file_name.clone(),
            Self::render(version)?,
        ))
    }
}

impl Default for VersionFilePlugin {
    fn default() -> Self {
        Self::new(VersionFileOptions::default())
    }
}

impl HtmlPlugin for VersionFilePlugin {
    fn name(&self) -> Cow<'static, str> {
        FILE_PLUGIN_NAME.into()
    }

    fn configure(&self, env: &ConfigEnv) -> Result<Option<ConfigPatch>> {
        self.mode.record(FILE_PLUGIN_NAME, env.command)?;
        let version = self
            .version
            .get_or_init(|| self.resolve(env.package_version.as_deref()));
        debug!("[fob-version-file] Resolved version {}", version);
        Ok(None)
    }

    fn on_build_end(&self, outcome: &BuildOutcome) -> Result<Vec<EmittedFile>> {
        if !self.mode.require(FILE_PLUGIN_NAME)?.is_build() {
            return Ok(Vec::new());
        }
        if let BuildOutcome::Failed(message) = outcome {
            debug!("[fob-version-file] Skipping emission, build failed: {}", message);
            return Ok(Vec::new());
        }

        let version = self.version().unwrap_or(FALLBACK_VERSION);
        info!(
            "[fob-version-file] Emitting {} ({})",
            self.options.file_name, version
        );
        Ok(vec![self.emitted_file(version)?])
    }
}

impl Plugin for VersionFilePlugin {
    fn name(&self) -> Cow<'static, str> {
        FILE_PLUGIN_NAME.into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::GenerateBundle
    }

    /// Add the version manifest to the bundle
    fn generate_bundle(
        &self,
        _ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let asset = self.bundle_output();

        async move {
            if let Some(asset) = asset? {
                args.bundle.push(asset);
            }
            Ok(())
        }
    }
}

impl VersionFilePlugin {
    /// The asset `generate_bundle` adds, if any.
    ///
    /// When the plugin was never configured the version comes from
    /// `npm_package_version`; a plugin configured for `serve` emits nothing.
    fn bundle_output(&self) -> Result<Option<Output>> {
        match self.mode.get() {
            Some(BuildCommand::Serve) => Ok(None),
            Some(BuildCommand::Build) => {
                let version = self.version().unwrap_or(FALLBACK_VERSION);
                bundle_asset(&self.options.file_name, version).map(Some)
            }
            None => {
                let env = ConfigEnv::from_process(BuildCommand::Build);
                let version = self.resolve(env.package_version.as_deref());
                bundle_asset(&self.options.file_name, &version).map(Some)
            }
        }
    }
}

fn bundle_asset(file_name: &str, version: &str) -> Result<Output> {
    let asset = OutputAsset {
        names: vec![],
        original_file_names: vec![],
        filename: file_name.to_string().into(),
        source: VersionFilePlugin::render(version)?.into(),
    };
    Ok(Output::Asset(Arc::new(asset)))
}
