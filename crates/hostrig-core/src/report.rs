//! Itemised failure reports for non-fatal lifecycle failures.

use std::fmt;

use hostrig_protocols::error::ExtensionError;
use hostrig_protocols::extension::ExtensionHandle;

/// Lifecycle callback a failure was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// `on_before_start` failed; fatal to the boot.
    Startup,
    /// `on_after_started` failed; the host keeps running.
    PostStart,
    /// `on_after_stopped` failed.
    Shutdown,
    /// `release` failed.
    Release,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Startup => "before-start",
            Self::PostStart => "after-started",
            Self::Shutdown => "after-stopped",
            Self::Release => "release",
        };
        f.write_str(name)
    }
}

/// One failed callback, attributed to its handle.
#[derive(Debug)]
pub struct HandleFailure {
    pub handle: String,
    pub ordinal: i32,
    pub kind: FailureKind,
    pub error: ExtensionError,
}

impl HandleFailure {
    pub fn new(handle: &dyn ExtensionHandle, kind: FailureKind, error: ExtensionError) -> Self {
        Self {
            handle: handle.id().to_string(),
            ordinal: handle.ordinal(),
            kind,
            error,
        }
    }
}

impl fmt::Display for HandleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed in {} (ordinal {}): {}",
            self.handle, self.kind, self.ordinal, self.error
        )
    }
}

/// Failures collected over one phase, in invocation order.
#[derive(Debug, Default)]
pub struct PhaseReport {
    failures: Vec<HandleFailure>,
}

impl PhaseReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, failure: HandleFailure) {
        self.failures.push(failure);
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[HandleFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<HandleFailure> {
        self.failures
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.is_empty() {
            return f.write_str("no failures");
        }
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

/// Combined report for the `AfterStopped` and `Closed` phases.
#[derive(Debug, Default)]
pub struct ShutdownReport {
    pub after_stopped: PhaseReport,
    pub release: PhaseReport,
}

impl ShutdownReport {
    pub fn is_clean(&self) -> bool {
        self.after_stopped.is_clean() && self.release.is_clean()
    }

    /// Number of failures across both phases.
    pub fn len(&self) -> usize {
        self.after_stopped.len() + self.release.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every failure, after-stopped first then release.
    pub fn failures(&self) -> impl Iterator<Item = &HandleFailure> {
        self.after_stopped
            .failures()
            .iter()
            .chain(self.release.failures())
    }
}

impl fmt::Display for ShutdownReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failure(s) [after-stopped: {}] [release: {}]",
            self.len(),
            self.after_stopped,
            self.release
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(handle: &str, kind: FailureKind) -> HandleFailure {
        HandleFailure {
            handle: handle.to_string(),
            ordinal: 0,
            kind,
            error: ExtensionError::Custom(format!("{handle} broke")),
        }
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Startup.to_string(), "before-start");
        assert_eq!(FailureKind::PostStart.to_string(), "after-started");
        assert_eq!(FailureKind::Shutdown.to_string(), "after-stopped");
        assert_eq!(FailureKind::Release.to_string(), "release");
    }

    #[test]
    fn test_handle_failure_display() {
        let display = failure("cache", FailureKind::Release).to_string();
        assert!(display.contains("cache"));
        assert!(display.contains("release"));
        assert!(display.contains("cache broke"));
    }

    #[test]
    fn test_phase_report_default_is_clean() {
        let report = PhaseReport::default();
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "no failures");
    }

    #[test]
    fn test_phase_report_lists_every_failure() {
        let mut report = PhaseReport::new();
        report.push(failure("a", FailureKind::PostStart));
        report.push(failure("b", FailureKind::PostStart));
        assert_eq!(report.len(), 2);
        let display = report.to_string();
        assert!(display.contains("a broke"));
        assert!(display.contains("b broke"));
    }

    #[test]
    fn test_shutdown_report_aggregates_phases() {
        let mut report = ShutdownReport::default();
        assert!(report.is_clean());
        report.after_stopped.push(failure("a", FailureKind::Shutdown));
        report.release.push(failure("b", FailureKind::Release));
        assert!(!report.is_clean());
        assert_eq!(report.len(), 2);
        let handles: Vec<_> = report.failures().map(|f| f.handle.as_str()).collect();
        assert_eq!(handles, vec!["a", "b"]);
        assert!(report.to_string().starts_with("2 failure(s)"));
    }
}
