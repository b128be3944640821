//! Version resolution.

use serde::Deserialize;
use std::path::Path;

use fob_html::{HtmlPluginError, Result};

/// Version written when neither an explicit nor a package version exists
pub const FALLBACK_VERSION: &str = "0.0.0";

/// Pick the version to stamp: an explicit override wins over the package
/// version supplied by the host. Empty strings count as absent.
pub fn resolve_version(explicit: Option<&str>, package: Option<&str>) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| package.filter(|v| !v.is_empty()))
        .map(str::to_string)
}

#[derive(Deserialize)]
struct Manifest {
    version: Option<String>,
}

/// Read the `version` field of `<dir>/package.json`.
///
/// For hosts that run outside a package manager script and therefore have no
/// `npm_package_version` in their environment. A manifest without a version
/// yields `Ok(None)`.
pub fn package_version_from_manifest(dir: impl AsRef<Path>) -> Result<Option<String>> {
    let path = dir.as_ref().join("package.json");
    let content = std::fs::read_to_string(&path)
        .map_err(|e| HtmlPluginError::manifest(&path, e.to_string()))?;
    let manifest: Manifest = serde_json::from_str(&content)
        .map_err(|e| HtmlPluginError::manifest(&path, e.to_string()))?;
    Ok(manifest.version.filter(|v| !v.is_empty()))
}
