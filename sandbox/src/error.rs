use codepad_shared::LanguageId;
use thiserror::Error;

/// Failures the sandbox reports instead of executing.
///
/// User-code failures are not errors at this boundary; they are captured
/// into the [`crate::ExecutionOutcome`] and rendered in the output log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    /// Execution was requested before the interpreter probe completed, or
    /// the interpreter is not installed on this host
    #[error("The {language} runtime is not ready. The interpreter is still being probed or is not installed on this host")]
    RuntimeNotReady {
        language: LanguageId,
    },

    /// A second run was requested while one is still in flight
    #[error("An execution is already in flight. Wait for the pending run to finish before starting another")]
    ExecutionBusy,

    /// The interpreter process could not be started
    #[error("Failed to start {language} interpreter '{interpreter}': {detail}")]
    SpawnFailed {
        language: LanguageId,
        interpreter: String,
        detail: String,
    },
}
