//! Ordered, immutable registry of extension handles and capability providers.

mod base;
mod snapshot;

pub use base::{Duplicate, OrderedSet, Registerable};
pub use snapshot::Registry;
