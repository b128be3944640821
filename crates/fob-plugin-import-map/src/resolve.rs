//! Rolldown integration
//!
//! Rolldown has no HTML pipeline, so inside a rolldown build the plugin only
//! takes part in resolution: mapped specifiers resolve to themselves and are
//! flagged external, leaving the bare import in the output for the browser's
//! import map to satisfy.

use rolldown_common::ResolvedExternal;
use rolldown_plugin::{
    HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};
use std::borrow::Cow;
use tracing::debug;

use crate::{ImportMapPlugin, PLUGIN_NAME};

impl ImportMapPlugin {
    /// Resolution result for `specifier`, if the import map owns it
    pub fn resolve_external(&self, specifier: &str) -> Option<HookResolveIdOutput> {
        if !self.is_external(specifier) {
            return None;
        }
        Some(HookResolveIdOutput {
            id: specifier.to_string().into(),
            external: Some(ResolvedExternal::Bool(true)),
            ..Default::default()
        })
    }
}

impl Plugin for ImportMapPlugin {
    fn name(&self) -> Cow<'static, str> {
        PLUGIN_NAME.into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId
    }

    /// Resolve ID hook - externalizes specifiers served by the import map
    ///
    /// # Returns
    ///
    /// - `Ok(Some(output))` - Specifier is mapped; keep it as a bare external import
    /// - `Ok(None)` - Not mapped (or not a production build), let Rolldown resolve it
    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs<'_>,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let resolved = self.resolve_external(args.specifier);
        if resolved.is_some() {
            debug!("[fob-import-map] Externalized {}", args.specifier);
        }

        async move { Ok(resolved) }
    }
}
