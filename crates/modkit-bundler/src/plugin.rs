//! Rolldown plugin that keeps module boundaries intact.
//!
//! Every import passes through `resolve_id`. Network URLs and references into
//! another module are reported as external so the emitted bundle keeps them as
//! live imports; everything else falls through to Rolldown's own resolver.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::Mutex;
use rolldown_common::ResolvedExternal;
use rolldown_plugin::{
    HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};

use crate::boundary::{ImportClass, ModuleBoundary};

/// One import left out of a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalImport {
    pub specifier: String,
    pub importer: String,
    pub class: ImportClass,
}

#[derive(Debug, Clone)]
pub struct ModuleBoundaryPlugin {
    boundary: ModuleBoundary,
    externals: Arc<Mutex<Vec<ExternalImport>>>,
}

impl ModuleBoundaryPlugin {
    pub fn new(boundary: ModuleBoundary) -> Self {
        Self {
            boundary,
            externals: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the externals recorded so far.
    ///
    /// The plugin itself is moved into the bundler, so grab this first.
    pub fn externals(&self) -> Arc<Mutex<Vec<ExternalImport>>> {
        Arc::clone(&self.externals)
    }
}

impl Plugin for ModuleBoundaryPlugin {
    fn name(&self) -> Cow<'static, str> {
        "modkit-module-boundary".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        // Entries have no importer and are always bundled.
        let verdict = args.importer.map(|importer| {
            let class = self.boundary.classify(&specifier, importer);
            let target_module = match class {
                ImportClass::CrossModule => self
                    .boundary
                    .module_name(self.boundary.resolve_target(&specifier, importer)),
                ImportClass::Network | ImportClass::Internal => None,
            };
            (importer.to_string(), class, target_module)
        });
        let externals = Arc::clone(&self.externals);

        async move {
            let Some((importer, class, target_module)) = verdict else {
                return Ok(None);
            };

            if !class.is_external() {
                return Ok(None);
            }

            tracing::debug!(
                %specifier,
                %importer,
                ?class,
                target_module = target_module.as_deref().unwrap_or("<outside>"),
                "keeping import external"
            );
            externals.lock().push(ExternalImport {
                specifier: specifier.clone(),
                importer,
                class,
            });

            Ok(Some(HookResolveIdOutput {
                id: specifier.into(),
                external: Some(ResolvedExternal::Bool(true)),
                ..Default::default()
            }))
        }
    }
}
