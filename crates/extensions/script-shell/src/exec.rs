//! Shell script execution.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use hostrig_protocols::capability::Capability;
use hostrig_protocols::error::CapabilityError;

/// A shell script bound to its parameter names.
///
/// Arguments are passed both as positional parameters (`$1..$n`) and as
/// environment variables named after the parameters.
pub struct ShellScript {
    tag: String,
    program: &'static str,
    script: String,
    parameters: Vec<String>,
    work_dir: Option<PathBuf>,
}

impl ShellScript {
    pub(crate) fn new(
        tag: &str,
        program: &'static str,
        script: &str,
        parameters: Vec<String>,
        work_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            program,
            script: script.to_string(),
            parameters,
            work_dir,
        }
    }

    pub fn program(&self) -> &str {
        self.program
    }

    /// Strings pass through unquoted; other values as compact JSON.
    fn render_arg(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl Capability for ShellScript {
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
        let rendered: Vec<String> = args.iter().map(Self::render_arg).collect();

        let mut cmd = Command::new(self.program);
        cmd.arg("-c")
            .arg(&self.script)
            .arg(self.program)
            .args(&rendered)
            .envs(self.parameters.iter().zip(rendered.iter()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }

        debug!(program = self.program, tag = %self.tag, args = rendered.len(), "Running script");
        let output = cmd
            .output()
            .await
            .map_err(|e| CapabilityError::ExecutionFailed(format!("{}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let code = output.status.code().unwrap_or(-1);

        if !output.status.success() {
            return Err(CapabilityError::ExecutionFailed(format!(
                "script exited with code {}: {}",
                code,
                stderr.trim()
            )));
        }

        Ok(serde_json::json!({
            "stdout": stdout,
            "stderr": stderr,
            "exit_code": code,
        }))
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
