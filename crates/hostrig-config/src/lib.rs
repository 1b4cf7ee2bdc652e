//! # hostrig Config
//!
//! Configuration management for the hostrig host binary. The core crates
//! never read configuration; the binary loads it and hands the relevant
//! pieces (extension settings, disabled ids) to discovery and the boot context.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
