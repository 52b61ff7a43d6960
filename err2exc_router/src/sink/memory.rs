//! In-memory sink. Keeps every write for later inspection.

use std::io;

use err2exc_common::kind::ErrorKind;

use super::{DiagnosticsSink, DisplayTarget};

/// Sink that stores log lines and display text instead of writing them.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    logs: Vec<(ErrorKind, String)>,
    displays: Vec<(DisplayTarget, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log writes in order.
    pub fn logs(&self) -> &[(ErrorKind, String)] {
        &self.logs
    }

    /// Log lines in order, without kinds.
    pub fn log_lines(&self) -> Vec<&str> {
        self.logs.iter().map(|(_, line)| line.as_str()).collect()
    }

    /// Display writes in order.
    pub fn displays(&self) -> &[(DisplayTarget, String)] {
        &self.displays
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.logs.clear();
        self.displays.clear();
    }
}

impl DiagnosticsSink for MemorySink {
    fn log(&mut self, kind: ErrorKind, line: &str) -> io::Result<()> {
        self.logs.push((kind, line.to_string()));
        Ok(())
    }

    fn display(&mut self, target: DisplayTarget, text: &str) -> io::Result<()> {
        self.displays.push((target, text.to_string()));
        Ok(())
    }
}
