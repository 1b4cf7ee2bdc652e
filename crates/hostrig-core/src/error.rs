//! Error types for registry construction, lifecycle, and dispatch.

use thiserror::Error;

use hostrig_protocols::error::CapabilityError;

use crate::lifecycle::Phase;
use crate::report::{HandleFailure, PhaseReport, ShutdownReport};

/// Registry construction errors.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Extension handle registered twice: {id}")]
    DuplicateHandle { id: String },

    #[error("Capability provider registered twice: {id}")]
    DuplicateProvider { id: String },
}

/// Boot orchestrator errors.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidPhaseTransition { from: Phase, to: Phase },

    /// A handle failed before start; the boot was aborted.
    #[error("Boot aborted: {failure}")]
    HandlerStartup {
        failure: HandleFailure,
        /// Failures raised while releasing the handles already touched.
        release: PhaseReport,
    },

    #[error("Shutdown completed with failures: {0}")]
    Shutdown(ShutdownReport),
}

impl LifecycleError {
    /// Whether the error aborted the boot sequence.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Shutdown(_))
    }
}

/// Capability dispatch errors.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No capability provider supports tag: {0}")]
    UnsupportedCapability(String),

    #[error("Provider '{provider}' failed to create capability for '{tag}': {source}")]
    CapabilityCreation {
        provider: String,
        tag: String,
        #[source]
        source: CapabilityError,
    },
}

/// Top-level error type for host processes.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),
}
