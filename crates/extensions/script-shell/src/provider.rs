//! Shell capability provider.

use std::path::PathBuf;

use async_trait::async_trait;

use hostrig_protocols::capability::{Capability, CapabilityProvider, DispatchRequest};
use hostrig_protocols::error::CapabilityError;

use crate::exec::ShellScript;

pub const PROVIDER_ID: &str = "script-shell";

const TAGS: &[&str] = &["sh", "bash", "shell"];

/// Provider creating [`ShellScript`] capabilities.
pub struct ShellProvider {
    work_dir: Option<PathBuf>,
}

impl ShellProvider {
    pub fn new() -> Self {
        Self { work_dir: None }
    }

    /// Run scripts in `dir` instead of the host's current directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    fn program_for(tag: &str) -> &'static str {
        if tag == "bash" { "bash" } else { "sh" }
    }

    fn is_valid_name(name: &str) -> bool {
        let mut chars = name.chars();
        matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
            && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
    }
}

impl Default for ShellProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CapabilityProvider for ShellProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn priority(&self) -> i32 {
        10
    }

    fn supports(&self, tag: &str) -> bool {
        TAGS.iter().any(|t| *t == tag)
    }

    async fn create(
        &self,
        request: &DispatchRequest,
    ) -> Result<Box<dyn Capability>, CapabilityError> {
        if request.script().trim().is_empty() {
            return Err(CapabilityError::InvalidScript(
                "script body is empty".to_string(),
            ));
        }
        if let Some(bad) = request
            .parameters()
            .iter()
            .find(|p| !Self::is_valid_name(p))
        {
            return Err(CapabilityError::InvalidScript(format!(
                "parameter '{}' is not a valid shell variable name",
                bad
            )));
        }

        Ok(Box::new(ShellScript::new(
            request.tag(),
            Self::program_for(request.tag()),
            request.script(),
            request.parameters().to_vec(),
            self.work_dir.clone(),
        )))
    }
}
