//! Capability dispatch.
//!
//! Resolves the provider that services a tag and delegates capability
//! creation to it. Selection is an ordered predicate scan: the first provider
//! in descending-priority order whose `supports` accepts the tag wins, with no
//! fallback to lower-priority providers when that one fails.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use hostrig_protocols::capability::{Capability, CapabilityProvider, DispatchRequest};

use crate::error::DispatchError;
use crate::registry::Registry;

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

/// Selects providers from an immutable registry.
///
/// Safe to share between tasks; the only mutable state is the per-tag
/// selection memo, which is sound because `supports` is deterministic and
/// the registry never changes. Only tags some provider supports are
/// memoised, so unknown tags from callers never grow it. Created
/// capabilities are never cached.
pub struct DispatchFacade {
    registry: Arc<Registry>,
    selections: DashMap<String, usize>,
}

impl DispatchFacade {
    /// Create a new dispatch facade.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            selections: DashMap::new(),
        }
    }

    /// Resolve the provider servicing `tag`.
    pub fn resolve(&self, tag: &str) -> Result<Arc<dyn CapabilityProvider>, DispatchError> {
        let cached = self.selections.get(tag).map(|entry| *entry.value());
        let index = match cached {
            Some(index) => index,
            None => {
                let index = self
                    .scan(tag)
                    .ok_or_else(|| DispatchError::UnsupportedCapability(tag.to_string()))?;
                self.selections.insert(tag.to_string(), index);
                index
            }
        };

        Ok(self.registry.providers()[index].clone())
    }

    /// Id of the provider servicing `tag`, if any.
    pub fn provider_for(&self, tag: &str) -> Option<String> {
        self.resolve(tag).ok().map(|p| p.id().to_string())
    }

    /// Resolve a provider for `request.tag()` and have it create a capability.
    pub async fn dispatch(
        &self,
        request: &DispatchRequest,
    ) -> Result<Box<dyn Capability>, DispatchError> {
        let provider = self.resolve(request.tag())?;
        debug!(
            tag = request.tag(),
            provider = provider.id(),
            parameters = request.parameters().len(),
            "Dispatching capability request"
        );

        provider.create(request).await.map_err(|source| {
            warn!(
                tag = request.tag(),
                provider = provider.id(),
                error = %source,
                "Capability creation failed"
            );
            DispatchError::CapabilityCreation {
                provider: provider.id().to_string(),
                tag: request.tag().to_string(),
                source,
            }
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn scan(&self, tag: &str) -> Option<usize> {
        let index = self
            .registry
            .providers()
            .iter()
            .position(|provider| provider.supports(tag));
        match index {
            Some(i) => debug!(tag, provider = self.registry.providers()[i].id(), "Provider selected"),
            None => debug!(tag, "No provider supports tag"),
        }
        index
    }
}
