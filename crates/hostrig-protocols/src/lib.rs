//! # hostrig Protocols
//!
//! Contract definitions (traits) shared by the hostrig core and its plugins.
//! Contains only interfaces and plain data - no orchestration logic.
//!
//! ## Core Traits
//!
//! - [`ExtensionHandle`] - A plugin taking part in the boot/shutdown sequence
//! - [`CapabilityProvider`] - An interchangeable provider of a tagged capability
//! - [`Capability`] - The artifact a provider creates for one request
//! - [`DiscoverySource`] - Supplies the unordered plugin set to the registry

pub mod capability;
pub mod error;
pub mod extension;

pub use capability::{Capability, CapabilityProvider, DispatchRequest};
pub use error::{CapabilityError, ExtensionError};
pub use extension::{BootContext, DiscoverySource, ExtensionHandle, StaticDiscovery};
