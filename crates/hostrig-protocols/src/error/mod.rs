//! Error types raised by plugin code behind the hostrig contracts.

mod capability;
mod extension;

pub use capability::*;
pub use extension::*;
