//! Boot orchestration.
//!
//! Walks the registry's extension handles through the process phases:
//! - `BeforeStart`: ascending ordinal, fail-fast
//! - `Running`: host marker signalled, then ascending ordinal, failures reported
//! - `AfterStopped`: descending ordinal, best-effort
//! - `Closed`: `release()` descending ordinal, best-effort, at most once per handle
//!
//! Handles are invoked one at a time; no timeout is applied to callbacks.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use hostrig_protocols::extension::BootContext;

use crate::error::LifecycleError;
use crate::registry::Registry;
use crate::report::{FailureKind, HandleFailure, PhaseReport, ShutdownReport};

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

/// Lifecycle phase. Each is entered at most once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Phase {
    /// Registry built, nothing invoked yet.
    Idle = 0,
    /// `on_before_start` running or completed.
    BeforeStart = 1,
    /// Host started.
    Running = 2,
    /// Shutdown requested, `on_after_stopped` running.
    AfterStopped = 3,
    /// Handles released. Terminal.
    Closed = 4,
}

impl From<u8> for Phase {
    fn from(v: u8) -> Self {
        match v {
            0 => Phase::Idle,
            1 => Phase::BeforeStart,
            2 => Phase::Running,
            3 => Phase::AfterStopped,
            _ => Phase::Closed,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Broadcasts every phase the orchestrator enters.
///
/// Subscribing to `Phase::Running` is how a host observes the "started"
/// marker.
#[derive(Clone)]
pub struct PhaseSignal {
    sender: broadcast::Sender<Phase>,
}

impl PhaseSignal {
    /// Create a new phase signal.
    pub fn new() -> Self {
        // Large enough to hold every phase of one run.
        let (sender, _) = broadcast::channel(8);
        Self { sender }
    }

    /// Publish a phase; a signal without subscribers drops it.
    pub fn notify(&self, phase: Phase) {
        let _ = self.sender.send(phase);
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> broadcast::Receiver<Phase> {
        self.sender.subscribe()
    }
}

impl Default for PhaseSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one registry through one boot/shutdown cycle.
pub struct BootOrchestrator {
    registry: Arc<Registry>,
    context: BootContext,
    phase: AtomicU8,
    before_start_done: AtomicBool,
    released: Vec<AtomicBool>,
    signal: PhaseSignal,
}

impl BootOrchestrator {
    /// Create an orchestrator with its own phase signal.
    pub fn new(registry: Arc<Registry>, context: BootContext) -> Self {
        Self::with_signal(registry, context, PhaseSignal::new())
    }

    /// Create an orchestrator publishing to a host-supplied signal.
    pub fn with_signal(registry: Arc<Registry>, context: BootContext, signal: PhaseSignal) -> Self {
        let released = (0..registry.len_handles())
            .map(|_| AtomicBool::new(false))
            .collect();
        Self {
            registry,
            context,
            phase: AtomicU8::new(Phase::Idle as u8),
            before_start_done: AtomicBool::new(false),
            released,
            signal,
        }
    }

    /// Get current phase.
    pub fn phase(&self) -> Phase {
        Phase::from(self.phase.load(Ordering::SeqCst))
    }

    /// Check if running.
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    pub fn signal(&self) -> &PhaseSignal {
        &self.signal
    }

    pub fn context(&self) -> &BootContext {
        &self.context
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Run `on_before_start` on every handle in ascending ordinal order.
    ///
    /// The first failure aborts the phase: later handles are skipped, every
    /// handle already invoked (the failing one included) is released in
    /// reverse order, and the orchestrator moves straight to `Closed`.
    pub async fn before_start(&self) -> Result<(), LifecycleError> {
        self.transition(Phase::Idle, Phase::BeforeStart)?;
        info!(handles = self.registry.len_handles(), "Running before-start phase");

        let handles = self.registry.handles();
        for (i, handle) in handles.iter().enumerate() {
            debug!(handle = handle.id(), ordinal = handle.ordinal(), "on_before_start");
            if let Err(e) = handle.on_before_start(&self.context).await {
                error!(
                    handle = handle.id(),
                    ordinal = handle.ordinal(),
                    error = %e,
                    "Before-start failed, aborting boot"
                );
                let failure = HandleFailure::new(handle.as_ref(), FailureKind::Startup, e);
                // Roll back everything touched so far, newest first.
                let release = self.release_through(i + 1).await;
                self.enter(Phase::Closed);
                return Err(LifecycleError::HandlerStartup { failure, release });
            }
        }

        self.before_start_done.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Enter `Running`: signal the host marker, then run `on_after_started`
    /// on every handle in ascending ordinal order.
    ///
    /// Failures do not stop the host; they are logged and returned.
    pub async fn mark_started(&self) -> Result<PhaseReport, LifecycleError> {
        if !self.before_start_done.load(Ordering::SeqCst) {
            return Err(LifecycleError::InvalidPhaseTransition {
                from: self.phase(),
                to: Phase::Running,
            });
        }
        self.transition(Phase::BeforeStart, Phase::Running)?;

        let mut report = PhaseReport::new();
        for handle in self.registry.handles() {
            debug!(handle = handle.id(), ordinal = handle.ordinal(), "on_after_started");
            if let Err(e) = handle.on_after_started(&self.context).await {
                warn!(handle = handle.id(), error = %e, "After-started failed");
                report.push(HandleFailure::new(handle.as_ref(), FailureKind::PostStart, e));
            }
        }

        info!(failures = report.len(), "Host started");
        Ok(report)
    }

    /// Run the before-start phase and enter `Running`.
    pub async fn boot(&self) -> Result<PhaseReport, LifecycleError> {
        self.before_start().await?;
        self.mark_started().await
    }

    /// Abandon a run that completed `before_start` but will not start.
    ///
    /// Moves `BeforeStart` straight to `Closed` and releases every handle in
    /// reverse ordinal order. `on_after_started` and `on_after_stopped` are
    /// never invoked.
    pub async fn abort(&self) -> Result<PhaseReport, LifecycleError> {
        if !self.before_start_done.load(Ordering::SeqCst) {
            return Err(LifecycleError::InvalidPhaseTransition {
                from: self.phase(),
                to: Phase::Closed,
            });
        }
        self.transition(Phase::BeforeStart, Phase::Closed)?;
        warn!("Boot abandoned before start, releasing handles");

        let report = self.release_through(self.registry.len_handles()).await;
        info!(failures = report.len(), "Host closed");
        Ok(report)
    }

    /// Shut down: `on_after_stopped` then `release()`, both in reverse
    /// ordinal order, invoking every handle regardless of earlier failures.
    pub async fn shutdown(&self) -> Result<ShutdownReport, LifecycleError> {
        self.transition(Phase::Running, Phase::AfterStopped)?;
        info!("Host shutting down...");

        let mut after_stopped = PhaseReport::new();
        for handle in self.registry.handles().iter().rev() {
            debug!(handle = handle.id(), ordinal = handle.ordinal(), "on_after_stopped");
            if let Err(e) = handle.on_after_stopped(&self.context).await {
                warn!(handle = handle.id(), error = %e, "After-stopped failed");
                after_stopped.push(HandleFailure::new(handle.as_ref(), FailureKind::Shutdown, e));
            }
        }

        self.transition(Phase::AfterStopped, Phase::Closed)?;
        let release = self.release_through(self.registry.len_handles()).await;

        let report = ShutdownReport {
            after_stopped,
            release,
        };
        info!(failures = report.len(), "Host closed");

        if report.is_clean() {
            Ok(report)
        } else {
            Err(LifecycleError::Shutdown(report))
        }
    }

    /// Release the first `count` handles in reverse order, skipping any
    /// already released.
    async fn release_through(&self, count: usize) -> PhaseReport {
        let mut report = PhaseReport::new();
        let handles = &self.registry.handles()[..count];
        for (i, handle) in handles.iter().enumerate().rev() {
            if self.released[i].swap(true, Ordering::SeqCst) {
                continue;
            }
            debug!(handle = handle.id(), ordinal = handle.ordinal(), "release");
            if let Err(e) = handle.release().await {
                warn!(handle = handle.id(), error = %e, "Release failed");
                report.push(HandleFailure::new(handle.as_ref(), FailureKind::Release, e));
            }
        }
        report
    }

    fn transition(&self, from: Phase, to: Phase) -> Result<(), LifecycleError> {
        self.phase
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|actual| LifecycleError::InvalidPhaseTransition {
                from: Phase::from(actual),
                to,
            })?;
        self.announce(to);
        Ok(())
    }

    fn enter(&self, to: Phase) {
        self.phase.store(to as u8, Ordering::SeqCst);
        self.announce(to);
    }

    fn announce(&self, phase: Phase) {
        debug!(%phase, "Entered phase");
        self.signal.notify(phase);
    }
}
