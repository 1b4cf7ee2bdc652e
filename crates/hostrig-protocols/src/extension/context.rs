//! Boot context shared with every extension handle.

use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Context passed to extension handles in every lifecycle phase.
///
/// Cloning is cheap; all clones observe the same immutable data.
#[derive(Clone)]
pub struct BootContext {
    run_id: String,
    args: Arc<[String]>,
    work_dir: PathBuf,
    loader: Option<Arc<dyn Any + Send + Sync>>,
    settings: Arc<serde_json::Value>,
}

impl BootContext {
    /// Create a new boot context from the process argument vector.
    pub fn new(args: impl IntoIterator<Item = impl Into<String>>, work_dir: PathBuf) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            args: args.into_iter().map(Into::into).collect(),
            work_dir,
            loader: None,
            settings: Arc::new(serde_json::Value::Null),
        }
    }

    /// Attach the module-resolution handle. The core never inspects it.
    pub fn with_loader<T: Any + Send + Sync>(mut self, loader: Arc<T>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Attach per-extension settings, a JSON object keyed by extension id.
    pub fn with_settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    /// Unique id of this process run.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Raw argument vector passed at process start.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Downcast the module-resolution handle to its concrete type.
    pub fn loader<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.loader.as_deref().and_then(|l| l.downcast_ref::<T>())
    }

    /// Deserialize the settings table for one extension.
    ///
    /// `Ok(None)` when no table is present for `extension_id`; a table that
    /// does not match `T` is an error.
    pub fn settings<T: serde::de::DeserializeOwned>(
        &self,
        extension_id: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        self.settings
            .get(extension_id)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
    }
}

impl std::fmt::Debug for BootContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootContext")
            .field("run_id", &self.run_id)
            .field("args", &self.args)
            .field("work_dir", &self.work_dir)
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
