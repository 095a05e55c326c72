use crate::outcome::ExecutionOutcome;

const PROMPT: &str = "> ";

/// Terminal-style output region backing the output log.
///
/// The only operations are appending text and resetting to the bare prompt.
/// Each run renders as a `Running...` marker, the outcome's lines, then a
/// trailing prompt. Single writer; execution is not reentrant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConsole {
    buffer: String,
}

impl OutputConsole {
    pub fn new() -> Self {
        Self {
            buffer: PROMPT.to_string(),
        }
    }

    /// Start a new execution's log section.
    pub fn begin_run(&mut self) {
        self.buffer = "Running...\n".to_string();
    }

    /// Render an outcome and restore the trailing prompt.
    pub fn finish_run(&mut self, outcome: &ExecutionOutcome) {
        for line in outcome.lines() {
            self.buffer.push_str(line);
            self.buffer.push('\n');
        }
        if let Some(detail) = outcome.failure() {
            self.buffer.push_str("Error:\n");
            self.buffer.push_str(detail);
        }
        self.buffer.push_str("\n> ");
    }

    /// Append a one-off notice line outside a run section.
    pub fn append_notice(&mut self, text: &str) {
        self.buffer.push('\n');
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Reset to the empty prompt.
    pub fn clear(&mut self) {
        self.buffer = PROMPT.to_string();
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }
}

impl Default for OutputConsole {
    fn default() -> Self {
        Self::new()
    }
}
