//! # hostrig Core
//!
//! Extension lifecycle orchestration and capability dispatch.
//!
//! ## Components
//!
//! - [`Registry`] - Immutable, ordered snapshot of handles and providers
//! - [`BootOrchestrator`] - Drives handles through the boot/shutdown phases
//! - [`DispatchFacade`] - Selects the provider servicing a capability tag
//! - [`Host`] - Ties the three together for a host process
//!
//! ## Lifecycle
//!
//! `Idle -> BeforeStart -> Running -> AfterStopped -> Closed`. A failed
//! `BeforeStart` goes straight to `Closed` after releasing the handles it
//! already touched.

pub mod dispatch;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod registry;
pub mod report;

#[cfg(test)]
mod test_support;

pub use dispatch::DispatchFacade;
pub use error::{DispatchError, HostError, LifecycleError, RegistrationError};
pub use host::Host;
pub use lifecycle::{BootOrchestrator, Phase, PhaseSignal};
pub use registry::Registry;
pub use report::{FailureKind, HandleFailure, PhaseReport, ShutdownReport};
