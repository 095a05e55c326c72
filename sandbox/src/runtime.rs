use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use codepad_shared::LanguageId;

use crate::error::SandboxError;

/// Limits applied to one execution.
#[derive(Debug, Clone)]
pub struct ExecutionLimits {
    /// Wall-clock bound on one run.
    pub timeout: Duration,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Raw capture from one interpreter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
}

impl Capture {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }
}

/// An interpreter adapter for one language profile.
#[async_trait]
pub trait CodeRuntime: Send + Sync {
    /// The profile this runtime executes.
    fn language(&self) -> LanguageId;

    /// Run `code` to completion, capturing its output streams. `Err` is
    /// reserved for failures to start the interpreter at all; user-code
    /// failures come back as an unsuccessful [`Capture`].
    async fn execute(&self, code: &str, limits: &ExecutionLimits) -> Result<Capture, SandboxError>;

    /// Whether the interpreter is present and responsive on this host.
    async fn probe(&self) -> bool;
}

pub(crate) async fn run_interpreter(
    program: &str,
    args: &[&str],
    limits: &ExecutionLimits,
    language: LanguageId,
) -> Result<Capture, SandboxError> {
    let mut command = tokio::process::Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // A timed-out child must not outlive its run.
        .kill_on_drop(true);

    let child = command.spawn().map_err(|err| SandboxError::SpawnFailed {
        language,
        interpreter: program.to_string(),
        detail: err.to_string(),
    })?;

    match tokio::time::timeout(limits.timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(Capture {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
            timed_out: false,
        }),
        Ok(Err(err)) => Err(SandboxError::SpawnFailed {
            language,
            interpreter: program.to_string(),
            detail: err.to_string(),
        }),
        Err(_) => Ok(Capture {
            stdout: String::new(),
            stderr: format!("execution timed out after {:?}", limits.timeout),
            exit_code: -1,
            timed_out: true,
        }),
    }
}

pub(crate) async fn probe_interpreter(program: &str) -> bool {
    tokio::process::Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}
