use async_trait::async_trait;
use codepad_shared::LanguageId;

use crate::error::SandboxError;
use crate::runtime::{probe_interpreter, run_interpreter, Capture, CodeRuntime, ExecutionLimits};

/// Executes the buffer through Node.js (`node -e`).
///
/// The evaluated code gets a fresh top-level scope per run; nothing persists
/// between executions. This is process isolation, not a language-level
/// sandbox inside a shared interpreter.
#[derive(Debug, Clone)]
pub struct JavaScriptRuntime {
    interpreter: String,
}

impl JavaScriptRuntime {
    pub fn new() -> Self {
        Self {
            interpreter: "node".to_string(),
        }
    }

    pub fn with_interpreter(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl Default for JavaScriptRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeRuntime for JavaScriptRuntime {
    fn language(&self) -> LanguageId {
        LanguageId::Javascript
    }

    async fn execute(&self, code: &str, limits: &ExecutionLimits) -> Result<Capture, SandboxError> {
        run_interpreter(&self.interpreter, &["-e", code], limits, self.language()).await
    }

    async fn probe(&self) -> bool {
        probe_interpreter(&self.interpreter).await
    }
}
