//! Log bootstrap handle.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use hostrig_protocols::error::ExtensionError;
use hostrig_protocols::extension::{BootContext, ExtensionHandle, ordinal};

pub const EXTENSION_ID: &str = "log-bootstrap";

/// Settings read from `[extensions.settings.log-bootstrap]`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogBootstrapSettings {
    /// Log directory; relative paths resolve against the work dir.
    #[serde(default)]
    pub dir: Option<String>,

    /// Marker file name inside the log directory.
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for LogBootstrapSettings {
    fn default() -> Self {
        Self {
            dir: None,
            marker: default_marker(),
        }
    }
}

fn default_marker() -> String {
    "boot.log".to_string()
}

/// Handle that owns the log directory for the lifetime of a run.
pub struct LogBootstrap {
    marker: Mutex<Option<PathBuf>>,
    released: AtomicBool,
}

impl LogBootstrap {
    pub fn new() -> Self {
        Self {
            marker: Mutex::new(None),
            released: AtomicBool::new(false),
        }
    }

    /// Marker file path, once `on_before_start` has prepared it.
    pub fn marker_path(&self) -> Option<PathBuf> {
        self.marker.lock().clone()
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    fn resolve_dir(ctx: &BootContext, settings: &LogBootstrapSettings) -> PathBuf {
        match settings.dir.as_deref() {
            Some(dir) => {
                let expanded = PathBuf::from(shellexpand::tilde(dir).as_ref());
                if expanded.is_absolute() {
                    expanded
                } else {
                    ctx.work_dir().join(expanded)
                }
            }
            None => ctx.work_dir().join("logs"),
        }
    }

    async fn append(path: &Path, line: &str) -> Result<(), ExtensionError> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        let stamp = chrono::Utc::now().to_rfc3339();
        file.write_all(format!("{stamp} {line}\n").as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn milestone(&self, line: &str) -> Result<(), ExtensionError> {
        let Some(path) = self.marker_path() else {
            return Err(ExtensionError::Custom(format!(
                "{EXTENSION_ID}: marker file not prepared"
            )));
        };
        Self::append(&path, line).await
    }
}

impl Default for LogBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtensionHandle for LogBootstrap {
    fn id(&self) -> &str {
        EXTENSION_ID
    }

    fn ordinal(&self) -> i32 {
        ordinal::LOGGING
    }

    async fn on_before_start(&self, ctx: &BootContext) -> Result<(), ExtensionError> {
        let settings: LogBootstrapSettings = ctx
            .settings(EXTENSION_ID)
            .map_err(|e| {
                ExtensionError::InitializationFailed(format!("invalid {EXTENSION_ID} settings: {e}"))
            })?
            .unwrap_or_default();
        if settings.marker.trim().is_empty() {
            return Err(ExtensionError::InitializationFailed(
                "marker file name cannot be empty".to_string(),
            ));
        }

        let dir = Self::resolve_dir(ctx, &settings);
        fs::create_dir_all(&dir).await.map_err(|e| {
            ExtensionError::InitializationFailed(format!(
                "cannot create log directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let path = dir.join(&settings.marker);
        Self::append(&path, &format!("boot run_id={}", ctx.run_id())).await?;
        info!(dir = %dir.display(), marker = %path.display(), "Log directory prepared");

        *self.marker.lock() = Some(path);
        Ok(())
    }

    async fn on_after_started(&self, _ctx: &BootContext) -> Result<(), ExtensionError> {
        self.milestone("started").await
    }

    async fn on_after_stopped(&self, _ctx: &BootContext) -> Result<(), ExtensionError> {
        self.milestone("stopped").await
    }

    async fn release(&self) -> Result<(), ExtensionError> {
        if self.released.swap(true, Ordering::AcqRel) {
            debug!("Log bootstrap already released");
            return Ok(());
        }
        if self.marker_path().is_some() {
            self.milestone("released").await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
