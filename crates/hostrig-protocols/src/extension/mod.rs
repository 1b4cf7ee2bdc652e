//! Extension protocol definitions.
//!
//! Extension handles take part in the host's boot and shutdown phases.

mod context;
mod discovery;
mod traits;

pub use context::*;
pub use discovery::*;
pub use traits::*;
