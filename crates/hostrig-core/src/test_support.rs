//! Shared mocks for unit tests.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use hostrig_protocols::capability::{Capability, CapabilityProvider, DispatchRequest};
use hostrig_protocols::error::{CapabilityError, ExtensionError};
use hostrig_protocols::extension::{BootContext, ExtensionHandle};

/// Shared, ordered log of `(handle, callback)` invocations.
#[derive(Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<(String, &'static str)>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, handle: &str, callback: &'static str) {
        self.entries.lock().push((handle.to_string(), callback));
    }

    /// Handles that received `callback`, in invocation order.
    pub fn calls(&self, callback: &str) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(_, cb)| *cb == callback)
            .map(|(handle, _)| handle.clone())
            .collect()
    }

    pub fn count(&self, handle: &str, callback: &str) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|(h, cb)| h == handle && *cb == callback)
            .count()
    }
}

/// Handle that records every callback and fails the ones it is told to.
pub struct RecordingHandle {
    id: String,
    ordinal: i32,
    journal: Journal,
    fail_on: HashSet<&'static str>,
}

impl RecordingHandle {
    pub fn new(id: &str, ordinal: i32, journal: &Journal) -> Self {
        Self {
            id: id.to_string(),
            ordinal,
            journal: journal.clone(),
            fail_on: HashSet::new(),
        }
    }

    /// Fail the named callback (`before_start`, `after_started`, `after_stopped`, `release`).
    pub fn failing(mut self, callback: &'static str) -> Self {
        self.fail_on.insert(callback);
        self
    }

    pub fn into_dyn(self) -> Arc<dyn ExtensionHandle> {
        Arc::new(self)
    }

    fn call(&self, callback: &'static str) -> Result<(), ExtensionError> {
        self.journal.record(&self.id, callback);
        if self.fail_on.contains(callback) {
            return Err(ExtensionError::Custom(format!("{} failed {}", self.id, callback)));
        }
        Ok(())
    }
}

#[async_trait]
impl ExtensionHandle for RecordingHandle {
    fn id(&self) -> &str {
        &self.id
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    async fn on_before_start(&self, _ctx: &BootContext) -> Result<(), ExtensionError> {
        self.call("before_start")
    }

    async fn on_after_started(&self, _ctx: &BootContext) -> Result<(), ExtensionError> {
        self.call("after_started")
    }

    async fn on_after_stopped(&self, _ctx: &BootContext) -> Result<(), ExtensionError> {
        self.call("after_stopped")
    }

    async fn release(&self) -> Result<(), ExtensionError> {
        self.call("release")
    }
}

/// Handle relying on the default no-op teardown callbacks.
pub struct MinimalHandle;

#[async_trait]
impl ExtensionHandle for MinimalHandle {
    fn id(&self) -> &str {
        "minimal"
    }

    async fn on_before_start(&self, _ctx: &BootContext) -> Result<(), ExtensionError> {
        Ok(())
    }

    async fn on_after_started(&self, _ctx: &BootContext) -> Result<(), ExtensionError> {
        Ok(())
    }
}

/// Provider supporting a fixed tag list and producing [`EchoCapability`].
pub struct StaticProvider {
    id: String,
    priority: i32,
    tags: Vec<&'static str>,
    fail_create: bool,
    created: AtomicUsize,
}

impl StaticProvider {
    pub fn new(id: &str, priority: i32, tags: &[&'static str]) -> Self {
        Self {
            id: id.to_string(),
            priority,
            tags: tags.to_vec(),
            fail_create: false,
            created: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn into_dyn(self) -> Arc<dyn CapabilityProvider> {
        Arc::new(self)
    }
}

#[async_trait]
impl CapabilityProvider for StaticProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supports(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }

    async fn create(
        &self,
        request: &DispatchRequest,
    ) -> Result<Box<dyn Capability>, CapabilityError> {
        if self.fail_create {
            return Err(CapabilityError::InvalidScript(format!(
                "{} rejects {}",
                self.id,
                request.script()
            )));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(EchoCapability {
            provider: self.id.clone(),
            tag: request.tag().to_string(),
            parameters: request.parameters().to_vec(),
        }))
    }
}

/// Capability returning the provider id and its bound arguments.
pub struct EchoCapability {
    provider: String,
    tag: String,
    parameters: Vec<String>,
}

#[async_trait]
impl Capability for EchoCapability {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn parameters(&self) -> &[String] {
        &self.parameters
    }

    async fn invoke(
        &self,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CapabilityError> {
        self.check_arity(&args)?;
        Ok(serde_json::json!({ "provider": self.provider, "args": args }))
    }
}
