//! Host facade owning one run's registry, orchestrator, and dispatcher.

use std::sync::Arc;

use tracing::{debug, info};

use hostrig_protocols::capability::{Capability, CapabilityProvider, DispatchRequest};
use hostrig_protocols::extension::{BootContext, DiscoverySource};

use crate::dispatch::DispatchFacade;
use crate::error::{DispatchError, LifecycleError, RegistrationError};
use crate::lifecycle::{BootOrchestrator, Phase, PhaseSignal};
use crate::registry::Registry;
use crate::report::{PhaseReport, ShutdownReport};

/// Everything a host process needs for one run.
///
/// The registry is built once up front and shared read-only between the
/// orchestrator and the dispatcher. Rebuilding requires a new `Host`.
pub struct Host {
    registry: Arc<Registry>,
    orchestrator: BootOrchestrator,
    dispatcher: DispatchFacade,
}

impl Host {
    /// Create a new host.
    pub fn new(registry: Registry, context: BootContext) -> Self {
        Self::with_signal(registry, context, PhaseSignal::new())
    }

    /// Create a new host publishing phases to a host-supplied signal.
    pub fn with_signal(registry: Registry, context: BootContext, signal: PhaseSignal) -> Self {
        let registry = Arc::new(registry);
        Self {
            orchestrator: BootOrchestrator::with_signal(registry.clone(), context, signal),
            dispatcher: DispatchFacade::new(registry.clone()),
            registry,
        }
    }

    /// Discover plugins and create a host over them.
    pub fn discover(
        source: &dyn DiscoverySource,
        context: BootContext,
    ) -> Result<Self, RegistrationError> {
        Ok(Self::new(Registry::discover(source)?, context))
    }

    /// Run the before-start phase and enter `Running`.
    pub async fn boot(&self) -> Result<PhaseReport, LifecycleError> {
        info!(run_id = self.context().run_id(), "Booting host");
        self.orchestrator.boot().await
    }

    /// Release everything after a completed before-start phase without
    /// entering `Running`.
    pub async fn abort(&self) -> Result<PhaseReport, LifecycleError> {
        self.orchestrator.abort().await
    }

    /// Run the after-stopped and release phases.
    pub async fn shutdown(&self) -> Result<ShutdownReport, LifecycleError> {
        self.orchestrator.shutdown().await
    }

    /// Resolve the provider servicing `tag`.
    pub fn resolve(&self, tag: &str) -> Result<Arc<dyn CapabilityProvider>, DispatchError> {
        self.dispatcher.resolve(tag)
    }

    /// Create a capability for `request`.
    pub async fn dispatch(
        &self,
        request: &DispatchRequest,
    ) -> Result<Box<dyn Capability>, DispatchError> {
        if !self.orchestrator.is_running() {
            debug!(phase = %self.phase(), tag = request.tag(), "Dispatch outside running phase");
        }
        self.dispatcher.dispatch(request).await
    }

    pub fn phase(&self) -> Phase {
        self.orchestrator.phase()
    }

    pub fn is_running(&self) -> bool {
        self.orchestrator.is_running()
    }

    pub fn signal(&self) -> &PhaseSignal {
        self.orchestrator.signal()
    }

    pub fn context(&self) -> &BootContext {
        self.orchestrator.context()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn orchestrator(&self) -> &BootOrchestrator {
        &self.orchestrator
    }

    pub fn dispatcher(&self) -> &DispatchFacade {
        &self.dispatcher
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
