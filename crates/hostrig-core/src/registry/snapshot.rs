//! The per-run registry snapshot.

use std::sync::Arc;

use tracing::info;

use hostrig_protocols::capability::CapabilityProvider;
use hostrig_protocols::extension::{DiscoverySource, ExtensionHandle};

use super::base::{OrderedSet, Registerable};
use crate::error::RegistrationError;

impl Registerable for dyn ExtensionHandle {
    fn registry_id(&self) -> &str {
        self.id()
    }

    fn sort_key(&self) -> i64 {
        i64::from(self.ordinal())
    }
}

impl Registerable for dyn CapabilityProvider {
    fn registry_id(&self) -> &str {
        self.id()
    }

    // Negated so the ascending sort yields descending priority.
    fn sort_key(&self) -> i64 {
        -i64::from(self.priority())
    }
}

/// Immutable snapshot of everything registered for one process run.
///
/// Handles are ordered ascending by ordinal, providers descending by
/// priority, both stable on discovery order. Nothing mutates a built
/// registry; share it as `Arc<Registry>` and read it from any thread.
pub struct Registry {
    handles: OrderedSet<dyn ExtensionHandle>,
    providers: OrderedSet<dyn CapabilityProvider>,
}

impl Registry {
    /// Build a registry from discovered plugins.
    pub fn build(
        handles: impl IntoIterator<Item = Arc<dyn ExtensionHandle>>,
        providers: impl IntoIterator<Item = Arc<dyn CapabilityProvider>>,
    ) -> Result<Self, RegistrationError> {
        let handles = OrderedSet::build(handles)
            .map_err(|dup| RegistrationError::DuplicateHandle { id: dup.0 })?;
        let providers = OrderedSet::build(providers)
            .map_err(|dup| RegistrationError::DuplicateProvider { id: dup.0 })?;

        info!(
            handles = handles.len(),
            providers = providers.len(),
            "Registry built"
        );
        Ok(Self { handles, providers })
    }

    /// Build a registry from a discovery source.
    pub fn discover(source: &dyn DiscoverySource) -> Result<Self, RegistrationError> {
        Self::build(source.handles(), source.providers())
    }

    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            handles: OrderedSet::empty(),
            providers: OrderedSet::empty(),
        }
    }

    /// Handles in startup order.
    pub fn handles(&self) -> &[Arc<dyn ExtensionHandle>] {
        self.handles.as_slice()
    }

    /// Providers in preference order.
    pub fn providers(&self) -> &[Arc<dyn CapabilityProvider>] {
        self.providers.as_slice()
    }

    pub fn handle_ids(&self) -> Vec<String> {
        self.handles.ids()
    }

    pub fn provider_ids(&self) -> Vec<String> {
        self.providers.ids()
    }

    pub fn len_handles(&self) -> usize {
        self.handles.len()
    }

    pub fn len_providers(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty() && self.providers.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
