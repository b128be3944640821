//! Build command and environment handed to plugins at configuration time.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HtmlPluginError, Result};

/// Environment variable package managers export with the manifest version
pub const PACKAGE_VERSION_VAR: &str = "npm_package_version";

/// Which host command is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildCommand {
    /// Production build producing deployable output
    Build,
    /// Development server
    #[default]
    Serve,
}

impl BuildCommand {
    pub fn is_build(self) -> bool {
        matches!(self, BuildCommand::Build)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildCommand::Build => "build",
            BuildCommand::Serve => "serve",
        }
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "build" | "production" => Ok(BuildCommand::Build),
            "serve" | "dev" | "development" => Ok(BuildCommand::Serve),
            other => Err(format!("Invalid build command: {}", other)),
        }
    }
}

/// Environment passed to [`HtmlPlugin::configure`](crate::HtmlPlugin::configure)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEnv {
    pub command: BuildCommand,
    /// Package version supplied by the host, if any
    pub package_version: Option<String>,
}

impl ConfigEnv {
    pub fn new(command: BuildCommand) -> Self {
        Self {
            command,
            package_version: None,
        }
    }

    /// Build an env for `command`, taking the package version from
    /// `npm_package_version`.
    pub fn from_process(command: BuildCommand) -> Self {
        let package_version = std::env::var(PACKAGE_VERSION_VAR)
            .ok()
            .filter(|v| !v.is_empty());
        Self::new(command).with_package_version(package_version)
    }

    pub fn with_package_version(mut self, version: Option<String>) -> Self {
        self.package_version = version;
        self
    }
}

/// Write-once holder for the build command a plugin was configured with.
///
/// Recording the same command twice is accepted; hosts typically call both a
/// config hook and a config-resolved hook with identical commands.
#[derive(Debug, Default)]
pub struct BuildModeSlot {
    command: OnceCell<BuildCommand>,
}

impl BuildModeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, plugin: &str, command: BuildCommand) -> Result<()> {
        let recorded = *self.command.get_or_init(|| command);
        if recorded != command {
            return Err(HtmlPluginError::mode_conflict(plugin, recorded, command));
        }
        Ok(())
    }

    /// Recorded command, or `NotConfigured`
    pub fn require(&self, plugin: &str) -> Result<BuildCommand> {
        self.command
            .get()
            .copied()
            .ok_or_else(|| HtmlPluginError::not_configured(plugin))
    }

    pub fn get(&self) -> Option<BuildCommand> {
        self.command.get().copied()
    }

    pub fn is_build(&self) -> bool {
        self.get().is_some_and(BuildCommand::is_build)
    }
}

impl Clone for BuildModeSlot {
    fn clone(&self) -> Self {
        let command = OnceCell::new();
        if let Some(recorded) = self.get() {
            let _ = command.set(recorded);
        }
        Self { command }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_command_from_str() {
        assert_eq!("build".parse::<BuildCommand>().unwrap(), BuildCommand::Build);
        assert_eq!("SERVE".parse::<BuildCommand>().unwrap(), BuildCommand::Serve);
        assert_eq!("dev".parse::<BuildCommand>().unwrap(), BuildCommand::Serve);
        assert!("watch".parse::<BuildCommand>().is_err());
    }

    #[test]
    fn test_config_env_package_version() {
        let env = ConfigEnv::new(BuildCommand::Build);
        assert_eq!(env.package_version, None);
        let env = env.with_package_version(Some("1.2.0".into()));
        assert_eq!(env.command, BuildCommand::Build);
        assert_eq!(env.package_version.as_deref(), Some("1.2.0"));
    }

    #[test]
    fn test_slot_requires_configuration() {
        let slot = BuildModeSlot::new();
        assert!(matches!(
            slot.require("test"),
            Err(HtmlPluginError::NotConfigured { .. })
        ));
        assert!(!slot.is_build());
    }

    #[test]
    fn test_slot_accepts_same_command_twice() {
        let slot = BuildModeSlot::new();
        slot.record("test", BuildCommand::Build).unwrap();
        slot.record("test", BuildCommand::Build).unwrap();
        assert_eq!(slot.require("test").unwrap(), BuildCommand::Build);
    }

    #[test]
    fn test_slot_rejects_switching_command() {
        let slot = BuildModeSlot::new();
        slot.record("test", BuildCommand::Serve).unwrap();
        let err = slot.record("test", BuildCommand::Build).unwrap_err();
        assert!(matches!(
            err,
            HtmlPluginError::ModeConflict {
                recorded: BuildCommand::Serve,
                requested: BuildCommand::Build,
                ..
            }
        ));
        assert_eq!(slot.get(), Some(BuildCommand::Serve));
    }

    #[test]
    fn test_slot_clone_keeps_command() {
        let slot = BuildModeSlot::new();
        slot.record("test", BuildCommand::Build).unwrap();
        assert!(slot.clone().is_build());
        assert_eq!(BuildModeSlot::new().clone().get(), None);
    }
}
