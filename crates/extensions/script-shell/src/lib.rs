//! Shell script capability for hostrig.
//!
//! Serves the `sh`, `bash` and `shell` tags by running the request body as a
//! child process.

mod exec;
mod provider;

pub use exec::ShellScript;
pub use provider::ShellProvider;
