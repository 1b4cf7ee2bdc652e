//! Discovery boundary between the host and the registry.

use std::sync::Arc;

use super::ExtensionHandle;
use crate::capability::CapabilityProvider;

/// Supplies the unordered set of plugins used to build a registry.
///
/// How plugins are found (static linking, configuration, a manifest
/// directory) is entirely the implementor's concern.
pub trait DiscoverySource: Send + Sync {
    /// Extension handles taking part in the lifecycle.
    fn handles(&self) -> Vec<Arc<dyn ExtensionHandle>>;

    /// Providers available for capability dispatch.
    fn providers(&self) -> Vec<Arc<dyn CapabilityProvider>>;
}

/// In-memory discovery source over plugins the host already owns.
#[derive(Default, Clone)]
pub struct StaticDiscovery {
    handles: Vec<Arc<dyn ExtensionHandle>>,
    providers: Vec<Arc<dyn CapabilityProvider>>,
}

impl StaticDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle(mut self, handle: Arc<dyn ExtensionHandle>) -> Self {
        self.handles.push(handle);
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn CapabilityProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn push_handle(&mut self, handle: Arc<dyn ExtensionHandle>) {
        self.handles.push(handle);
    }

    pub fn push_provider(&mut self, provider: Arc<dyn CapabilityProvider>) {
        self.providers.push(provider);
    }
}

impl DiscoverySource for StaticDiscovery {
    fn handles(&self) -> Vec<Arc<dyn ExtensionHandle>> {
        self.handles.clone()
    }

    fn providers(&self) -> Vec<Arc<dyn CapabilityProvider>> {
        self.providers.clone()
    }
}
