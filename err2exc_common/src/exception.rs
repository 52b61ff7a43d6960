//! Exception value produced when a signal is rethrown.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kind::ErrorKind;
use crate::location::Location;

/// Catchable error built from a rethrown signal.
///
/// Follows the legacy dual-field layout: the kind is stored both as the
/// numeric `code` and as `severity`. Ambient context has no slot here and
/// is not carried over.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ErrorException {
    /// Diagnostic text of the original signal.
    pub message: String,
    /// Numeric kind code.
    pub code: u32,
    /// Kind of the original signal.
    pub severity: ErrorKind,
    /// Where the original signal was raised.
    pub location: Location,
}

impl ErrorException {
    /// Build from the parts of a signal.
    pub fn new(message: impl Into<String>, kind: ErrorKind, location: Location) -> Self {
        Self {
            message: message.into(),
            code: kind.code(),
            severity: kind,
            location,
        }
    }

    /// Kind of the original signal.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.severity
    }

    /// Source file, if known.
    #[inline]
    pub fn file(&self) -> Option<&str> {
        self.location.file.as_deref()
    }

    /// Source line, if known.
    #[inline]
    pub fn line(&self) -> Option<u32> {
        self.location.line
    }
}
