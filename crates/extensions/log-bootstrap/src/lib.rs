//! Log bootstrap extension for hostrig.
//!
//! Runs first on boot and last on shutdown: prepares the log directory and
//! writes a marker file recording lifecycle milestones of the run.

mod handle;

pub use handle::{LogBootstrap, LogBootstrapSettings};
