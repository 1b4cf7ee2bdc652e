//! Built-in extension registration for hostrig.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use hostrig_config::Config;
use hostrig_log_bootstrap::LogBootstrap;
use hostrig_protocols::capability::CapabilityProvider;
use hostrig_protocols::extension::{BootContext, ExtensionHandle, StaticDiscovery};
use hostrig_script_shell::ShellProvider;
use hostrig_script_template::TemplateProvider;

/// All extension handles compiled into the binary.
fn builtin_handles() -> Vec<Arc<dyn ExtensionHandle>> {
    vec![Arc::new(LogBootstrap::new())]
}

/// All capability providers compiled into the binary.
fn builtin_providers(work_dir: &Path) -> Vec<Arc<dyn CapabilityProvider>> {
    vec![
        Arc::new(ShellProvider::new().with_work_dir(work_dir)),
        Arc::new(TemplateProvider::new()),
    ]
}

/// Ids of every built-in extension.
pub(crate) fn builtin_ids() -> Vec<String> {
    let handles = builtin_handles();
    let providers = builtin_providers(Path::new("."));
    handles
        .iter()
        .map(|h| h.id().to_string())
        .chain(providers.iter().map(|p| p.id().to_string()))
        .collect()
}

/// Ids named in `[extensions]` that match no built-in extension.
pub(crate) fn unknown_ids(config: &Config) -> Vec<String> {
    let known = builtin_ids();
    let ext = &config.extensions;
    let mut unknown: Vec<String> = ext
        .enabled
        .iter()
        .chain(ext.disabled.iter())
        .chain(ext.settings.keys())
        .filter(|id| !known.contains(id))
        .cloned()
        .collect();
    unknown.sort();
    unknown.dedup();
    unknown
}

/// Discovery source over the built-ins that pass the config filters.
pub(crate) fn discover(config: &Config, work_dir: &Path) -> StaticDiscovery {
    for id in unknown_ids(config) {
        warn!(extension = %id, "Configured extension is not built in");
    }

    let mut discovery = StaticDiscovery::new();
    for handle in builtin_handles() {
        if config.extensions.is_enabled(handle.id()) {
            discovery.push_handle(handle);
        } else {
            info!(extension = handle.id(), "Extension handle disabled");
        }
    }
    for provider in builtin_providers(work_dir) {
        if config.extensions.is_enabled(provider.id()) {
            discovery.push_provider(provider);
        } else {
            info!(extension = provider.id(), "Capability provider disabled");
        }
    }
    discovery
}

/// Boot context carrying the process arguments and extension settings.
pub(crate) fn boot_context(config: &Config, work_dir: PathBuf) -> BootContext {
    BootContext::new(std::env::args(), work_dir).with_settings(config.extensions.settings_value())
}

#[cfg(test)]
#[path = "register_tests.rs"]
mod tests;
