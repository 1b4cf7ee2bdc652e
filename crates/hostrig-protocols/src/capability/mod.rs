//! Capability provider protocol definitions.
//!
//! Providers offer interchangeable implementations of a tagged capability
//! (for example "can run a script written in language X").

mod request;
mod traits;

pub use request::*;
pub use traits::*;
