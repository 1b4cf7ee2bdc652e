//! Extension handle trait definition.

use async_trait::async_trait;

use super::BootContext;
use crate::error::ExtensionError;

/// Core trait for everything that participates in the host lifecycle.
///
/// The orchestrator drives handles through fixed phases:
/// - `on_before_start` in ascending ordinal order, fail-fast
/// - `on_after_started` in ascending ordinal order, failures reported
/// - `on_after_stopped` in descending ordinal order, best-effort
/// - `release` in descending ordinal order, at most once per run
#[async_trait]
pub trait ExtensionHandle: Send + Sync + 'static {
    /// Identity used in logs and failure reports.
    fn id(&self) -> &str;

    /// Sort key for lifecycle ordering (lower = earlier start, later stop).
    fn ordinal(&self) -> i32 {
        0
    }

    /// Called before the host starts.
    async fn on_before_start(&self, ctx: &BootContext) -> Result<(), ExtensionError>;

    /// Called once the host has signalled that it is running.
    async fn on_after_started(&self, ctx: &BootContext) -> Result<(), ExtensionError>;

    /// Called after the host has been asked to stop.
    async fn on_after_stopped(&self, _ctx: &BootContext) -> Result<(), ExtensionError> {
        Ok(())
    }

    /// Releases scoped resources. Must tolerate being the only lifecycle call
    /// a handle ever receives after `on_before_start`.
    async fn release(&self) -> Result<(), ExtensionError> {
        Ok(())
    }
}

/// Ordinal levels for well-known handle groups (lower = starts earlier, stops later).
pub mod ordinal {
    pub const LOGGING: i32 = -100;
    pub const INFRASTRUCTURE: i32 = -50;
    pub const DEFAULT: i32 = 0;
    pub const SERVICES: i32 = 50;
    pub const APPLICATION: i32 = 100;
}
