/// Captured result of one execution: output lines in emission order plus an
/// optional terminal failure description.
///
/// Produced fresh per run and discarded after being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    lines: Vec<String>,
    failure: Option<String>,
}

impl ExecutionOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a chunk of captured output. A chunk may contain any number of
    /// newlines; each completed line becomes one recorded entry.
    pub fn push_chunk(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        let mut parts: Vec<&str> = chunk.split('\n').collect();
        if chunk.ends_with('\n') {
            parts.pop();
        }
        self.lines.extend(parts.into_iter().map(str::to_string));
    }

    /// Record the terminal failure of this run.
    pub fn fail(&mut self, detail: impl Into<String>) {
        self.failure = Some(detail.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_split_into_lines() {
        let mut outcome = ExecutionOutcome::new();
        outcome.push_chunk("a\nb\n");
        assert_eq!(outcome.lines(), ["a", "b"]);

        outcome.push_chunk("partial");
        assert_eq!(outcome.lines(), ["a", "b", "partial"]);
    }

    #[test]
    fn interior_empty_lines_are_kept() {
        let mut outcome = ExecutionOutcome::new();
        outcome.push_chunk("a\n\nb\n");
        assert_eq!(outcome.lines(), ["a", "", "b"]);
    }

    #[test]
    fn empty_chunk_records_nothing() {
        let mut outcome = ExecutionOutcome::new();
        outcome.push_chunk("");
        assert!(outcome.lines().is_empty());
        assert!(outcome.is_success());
    }

    #[test]
    fn failure_is_terminal_state() {
        let mut outcome = ExecutionOutcome::new();
        outcome.push_chunk("before\n");
        outcome.fail("Traceback: boom");
        assert!(!outcome.is_success());
        assert_eq!(outcome.failure(), Some("Traceback: boom"));
        assert_eq!(outcome.lines(), ["before"]);
    }
}
