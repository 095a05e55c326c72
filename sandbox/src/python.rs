use async_trait::async_trait;
use codepad_shared::LanguageId;

use crate::error::SandboxError;
use crate::runtime::{probe_interpreter, run_interpreter, Capture, CodeRuntime, ExecutionLimits};

/// Executes the buffer through the system Python interpreter (`python3 -c`).
#[derive(Debug, Clone)]
pub struct PythonRuntime {
    interpreter: String,
}

impl PythonRuntime {
    pub fn new() -> Self {
        Self {
            interpreter: "python3".to_string(),
        }
    }

    pub fn with_interpreter(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl Default for PythonRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeRuntime for PythonRuntime {
    fn language(&self) -> LanguageId {
        LanguageId::Python
    }

    async fn execute(&self, code: &str, limits: &ExecutionLimits) -> Result<Capture, SandboxError> {
        run_interpreter(&self.interpreter, &["-c", code], limits, self.language()).await
    }

    async fn probe(&self) -> bool {
        probe_interpreter(&self.interpreter).await
    }
}
