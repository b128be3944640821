//! `fob-html.toml` / `fob-html.json` loading.
//!
//! ```toml
//! [import_map]
//! css_serve = false
//!
//! [[import_map.modules]]
//! name = "vue"
//! path = "https://cdn.jsdelivr.net/npm/vue@3.3.4/dist/vue.esm-browser.js"
//!
//! [version]
//! emit = "both"
//! log_prefix = "shop"
//! ```
//!
//! Priority: environment variables (`FOB_HTML_VERSION__EMIT=file`) > config
//! file > defaults. Defaults come from the options' serde defaults rather
//! than a serialized layer, so camelCase aliases in a file never collide
//! with a default key.
//!
//! String-valued keys keep their text: `FOB_HTML_VERSION__VERSION=2.0`
//! yields `"2.0"`, and `version = 3` in a file yields `"3"`.

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use fob_plugin_import_map::ImportMapOptions;
use fob_plugin_version::{VersionFileOptions, VersionLogOptions};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Files looked up in the working directory when `--config` is not given
pub const CONFIG_FILE_NAMES: [&str; 2] = ["fob-html.toml", "fob-html.json"];

/// Environment override prefix; `__` separates nested keys
pub const ENV_PREFIX: &str = "FOB_HTML_";

/// Keys whose environment overrides are taken verbatim instead of parsed
const VERBATIM_ENV_KEYS: [&str; 3] = ["version.version", "version.log_prefix", "version.file_name"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    #[serde(alias = "importMap")]
    pub import_map: ImportMapOptions,
    pub version: VersionConfig,
}

/// Which version stamp(s) a build gets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionEmit {
    #[default]
    Inline,
    File,
    Both,
    None,
}

impl VersionEmit {
    pub fn inline(self) -> bool {
        matches!(self, VersionEmit::Inline | VersionEmit::Both)
    }

    pub fn file(self) -> bool {
        matches!(self, VersionEmit::File | VersionEmit::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    pub emit: VersionEmit,
    #[serde(alias = "logPrefix", deserialize_with = "string_or_number")]
    pub log_prefix: String,
    #[serde(alias = "fileName", deserialize_with = "string_or_number")]
    pub file_name: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_string_or_number"
    )]
    pub version: Option<String>,
}

/// A scalar that config files may write bare, like `version = 3`
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) if n.fract() == 0.0 => format!("{:.1}", n),
            Scalar::Float(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

impl Default for VersionConfig {
    fn default() -> Self {
        let log = VersionLogOptions::default();
        let file = VersionFileOptions::default();
        Self {
            emit: VersionEmit::default(),
            log_prefix: log.log_prefix,
            file_name: file.file_name,
            version: None,
        }
    }
}

impl VersionConfig {
    pub fn log_options(&self) -> VersionLogOptions {
        VersionLogOptions {
            log_prefix: self.log_prefix.clone(),
            version: self.version.clone(),
        }
    }

    pub fn file_options(&self) -> VersionFileOptions {
        VersionFileOptions {
            file_name: self.file_name.clone(),
            version: self.version.clone(),
        }
    }
}

impl HtmlConfig {
    /// Load configuration relative to the current directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_from(config_path, Path::new("."))
    }

    /// Load configuration, resolving relative paths and discovery against `cwd`.
    pub fn load_from(config_path: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new();

        let config_file = match config_path {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    cwd.join(path)
                };
                if !path.exists() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => discover(cwd),
        };

        if let Some(path) = config_file {
            debug!("Loading config from {}", path.display());
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file(&path)),
                Some("json") => figment.merge(Json::file(&path)),
                _ => return Err(ConfigError::UnsupportedFormat(path).into()),
            };
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        for key in VERBATIM_ENV_KEYS {
            if let Ok(value) = std::env::var(env_var(key)) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        figment.extract().map_err(|e| {
            ConfigError::Invalid {
                message: e.to_string(),
            }
            .into()
        })
    }
}

/// `version.file_name` -> `FOB_HTML_VERSION__FILE_NAME`
fn env_var(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.replace('.', "__").to_uppercase())
}

fn discover(cwd: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.exists())
}
