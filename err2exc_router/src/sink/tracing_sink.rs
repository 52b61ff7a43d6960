//! Sink backed by `tracing` for the log channel and real streams for display.

use std::io::{self, Write};

use err2exc_common::kind::{ErrorKind, Severity};
use tracing::{error, info, warn};

use super::{DiagnosticsSink, DisplayTarget};

/// Log target used for every error record.
pub const LOG_TARGET: &str = "err2exc::error_log";

/// Log lines become `tracing` events (fatal kinds at ERROR, warnings at
/// WARN, the rest at INFO). Display text is written to the chosen stream
/// followed by a newline.
pub struct TracingSink<O = io::Stdout, E = io::Stderr> {
    stdout: O,
    stderr: E,
}

impl TracingSink {
    /// Sink on the process's standard streams.
    pub fn new() -> Self {
        Self::with_streams(io::stdout(), io::stderr())
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Write, E: Write> TracingSink<O, E> {
    /// Sink on caller-supplied streams.
    pub fn with_streams(stdout: O, stderr: E) -> Self {
        Self { stdout, stderr }
    }

    /// Give back the streams.
    pub fn into_streams(self) -> (O, E) {
        (self.stdout, self.stderr)
    }
}

impl<O: Write, E: Write> DiagnosticsSink for TracingSink<O, E> {
    fn log(&mut self, kind: ErrorKind, line: &str) -> io::Result<()> {
        let code = kind.code();
        match kind.severity() {
            Severity::Fatal => error!(target: LOG_TARGET, code, "{line}"),
            Severity::Warning => warn!(target: LOG_TARGET, code, "{line}"),
            Severity::Notice => info!(target: LOG_TARGET, code, "{line}"),
        }
        Ok(())
    }

    fn display(&mut self, target: DisplayTarget, text: &str) -> io::Result<()> {
        match target {
            DisplayTarget::Stdout => {
                writeln!(self.stdout, "{text}")?;
                self.stdout.flush()
            }
            DisplayTarget::Stderr => {
                writeln!(self.stderr, "{text}")?;
                self.stderr.flush()
            }
        }
    }
}
