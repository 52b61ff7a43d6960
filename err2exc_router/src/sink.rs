//! Diagnostics sink and the gating applied before anything reaches it.
//!
//! The sink only knows how to write a log line and how to display text on
//! a stream. Deciding *whether* a signal is written is owned here:
//!
//! 1. The kind must intersect the configured reporting mask, otherwise
//!    nothing is recorded.
//! 2. Log channel: logging enabled AND the policy lets the kind be logged
//!    (rethrown kinds are skipped unless `log_rethrown`).
//! 3. Display channel: independent of the rethrow rule, gated only by the
//!    display destination. Decorated with the prepend/append strings.
//!
//! Write failures are swallowed and reported through `tracing`; they never
//! affect dispatch.

mod memory;
mod tracing_sink;

pub use memory::MemorySink;
pub use tracing_sink::TracingSink;

use std::io;

use err2exc_common::config::{ConfigProvider, DisplayErrors};
use err2exc_common::format::format_error_line;
use err2exc_common::kind::ErrorKind;
use tracing::warn;

use crate::policy::RoutingPolicy;
use crate::signal::ErrorSignal;

/// Display stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    Stdout,
    Stderr,
}

impl DisplayTarget {
    /// Stream for a display setting, `None` when display is off.
    pub fn from_setting(setting: DisplayErrors) -> Option<Self> {
        match setting {
            DisplayErrors::Off => None,
            DisplayErrors::Stdout => Some(Self::Stdout),
            DisplayErrors::Stderr => Some(Self::Stderr),
        }
    }
}

/// Output side of error recording.
pub trait DiagnosticsSink {
    /// Write one formatted line to the log channel.
    fn log(&mut self, kind: ErrorKind, line: &str) -> io::Result<()>;

    /// Display decorated text on a stream.
    fn display(&mut self, target: DisplayTarget, text: &str) -> io::Result<()>;
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for Box<S> {
    fn log(&mut self, kind: ErrorKind, line: &str) -> io::Result<()> {
        (**self).log(kind, line)
    }

    fn display(&mut self, target: DisplayTarget, text: &str) -> io::Result<()> {
        (**self).display(target, text)
    }
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for &mut S {
    fn log(&mut self, kind: ErrorKind, line: &str) -> io::Result<()> {
        (**self).log(kind, line)
    }

    fn display(&mut self, target: DisplayTarget, text: &str) -> io::Result<()> {
        (**self).display(target, text)
    }
}

/// What happened to one signal at the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recording {
    /// Kind intersected the reporting mask.
    pub eligible: bool,
    /// A log line was written.
    pub logged: bool,
    /// Display text was written.
    pub displayed: bool,
}

/// Apply the gating rules and write `signal` to `sink`.
///
/// `logged`/`displayed` are true only for writes that succeeded.
pub fn record_signal<S, C>(
    sink: &mut S,
    config: &C,
    policy: &RoutingPolicy,
    signal: &ErrorSignal,
) -> Recording
where
    S: DiagnosticsSink + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let mut recording = Recording::default();
    if !signal.kind.intersects(config.reporting_mask()) {
        return recording;
    }
    recording.eligible = true;

    let line = format_error_line(
        config.runtime_label(),
        signal.kind,
        &signal.message,
        &signal.location,
    );

    if config.log_errors() && policy.should_log(signal.kind) {
        match sink.log(signal.kind, &line) {
            Ok(()) => recording.logged = true,
            Err(e) => warn!(code = signal.kind.code(), "error log write failed: {e}"),
        }
    }

    if let Some(target) = DisplayTarget::from_setting(config.display_errors()) {
        let text = format!(
            "{}{}{}",
            config.prepend_string(),
            line,
            config.append_string()
        );
        match sink.display(target, &text) {
            Ok(()) => recording.displayed = true,
            Err(e) => warn!(code = signal.kind.code(), ?target, "error display write failed: {e}"),
        }
    }

    recording
}
