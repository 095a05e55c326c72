use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use codepad_shared::LanguageId;
use log::{debug, info, warn};

use crate::error::SandboxError;
use crate::javascript::JavaScriptRuntime;
use crate::outcome::ExecutionOutcome;
use crate::python::PythonRuntime;
use crate::runtime::{CodeRuntime, ExecutionLimits};

/// Sandbox-wide configuration.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Wall-clock bound on one run.
    pub timeout: Duration,
    /// Interpreter used for the `python` profile.
    pub python_interpreter: String,
    /// Interpreter used for the `javascript` profile.
    pub javascript_interpreter: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            python_interpreter: "python3".to_string(),
            javascript_interpreter: "node".to_string(),
        }
    }
}

/// One-time probe state for a runtime. `ready` only once the probe has
/// completed *and* found the interpreter.
#[derive(Debug, Default)]
struct RuntimeStatus {
    probed: AtomicBool,
    available: AtomicBool,
}

impl RuntimeStatus {
    fn ready(&self) -> bool {
        self.probed.load(Ordering::Acquire) && self.available.load(Ordering::Acquire)
    }

    fn record(&self, available: bool) {
        self.available.store(available, Ordering::Release);
        self.probed.store(true, Ordering::Release);
    }
}

/// Clears the in-flight slot when a run finishes, however it finishes.
struct FlightGuard {
    slot: Arc<AtomicBool>,
}

impl FlightGuard {
    fn acquire(slot: &Arc<AtomicBool>) -> Result<Self, SandboxError> {
        if slot
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SandboxError::ExecutionBusy);
        }
        Ok(Self { slot: slot.clone() })
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::Release);
    }
}

/// Runs buffer contents under a language profile and captures their output.
///
/// Owns the readiness state of both interpreters; constructed once per
/// session and handed to whatever triggers execution. One run may be in
/// flight at a time; a second request is rejected, not queued.
pub struct ExecutionSandbox {
    python: PythonRuntime,
    javascript: JavaScriptRuntime,
    limits: ExecutionLimits,
    python_status: Arc<RuntimeStatus>,
    javascript_status: Arc<RuntimeStatus>,
    in_flight: Arc<AtomicBool>,
}

impl ExecutionSandbox {
    /// Build a sandbox and kick off the one-time interpreter probes.
    ///
    /// Must be called from within a tokio runtime; the probes run as
    /// background tasks and flip [`ExecutionSandbox::ready`] when done.
    pub fn start(config: SandboxConfig) -> Self {
        let sandbox = Self {
            python: PythonRuntime::with_interpreter(&config.python_interpreter),
            javascript: JavaScriptRuntime::with_interpreter(&config.javascript_interpreter),
            limits: ExecutionLimits {
                timeout: config.timeout,
            },
            python_status: Arc::new(RuntimeStatus::default()),
            javascript_status: Arc::new(RuntimeStatus::default()),
            in_flight: Arc::new(AtomicBool::new(false)),
        };
        sandbox.spawn_probe(sandbox.python.clone(), sandbox.python_status.clone());
        sandbox.spawn_probe(sandbox.javascript.clone(), sandbox.javascript_status.clone());
        sandbox
    }

    fn spawn_probe<R: CodeRuntime + 'static>(&self, runtime: R, status: Arc<RuntimeStatus>) {
        tokio::spawn(async move {
            let available = runtime.probe().await;
            status.record(available);
            if available {
                info!("{} runtime ready", runtime.language());
            } else {
                warn!("{} interpreter not found; runs will be rejected", runtime.language());
            }
        });
    }

    /// Whether the profile's interpreter probe has completed successfully.
    /// Cheap and synchronous, so a run control can check before submitting.
    pub fn ready(&self, language: LanguageId) -> bool {
        self.status(language).ready()
    }

    /// Execute `code` under the given profile.
    ///
    /// User-code failures (nonzero exit, signal, timeout) are captured into
    /// the outcome; `Err` is reserved for the sandbox refusing or failing to
    /// start the run at all.
    pub async fn run(
        &self,
        code: &str,
        language: LanguageId,
    ) -> Result<ExecutionOutcome, SandboxError> {
        let _flight = FlightGuard::acquire(&self.in_flight)?;
        if !self.ready(language) {
            return Err(SandboxError::RuntimeNotReady { language });
        }

        debug!("running {} buffer ({} bytes)", language, code.len());
        let capture = self.runtime(language).execute(code, &self.limits).await?;

        let mut outcome = ExecutionOutcome::new();
        outcome.push_chunk(&capture.stdout);
        if !capture.succeeded() {
            outcome.fail(capture.stderr.trim_end());
        }
        Ok(outcome)
    }

    fn status(&self, language: LanguageId) -> &RuntimeStatus {
        match language {
            LanguageId::Python => &self.python_status,
            LanguageId::Javascript => &self.javascript_status,
        }
    }

    fn runtime(&self, language: LanguageId) -> &dyn CodeRuntime {
        match language {
            LanguageId::Python => &self.python,
            LanguageId::Javascript => &self.javascript,
        }
    }
}
