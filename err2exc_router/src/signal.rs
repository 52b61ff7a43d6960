//! Raised error signals.
//!
//! A signal is built by whatever raised the error, handed to the router
//! once and then dropped.

use std::collections::BTreeMap;

use err2exc_common::exception::ErrorException;
use err2exc_common::kind::ErrorKind;
use err2exc_common::location::Location;
use serde::Serialize;
use serde_json::Value;

/// Ambient data captured with a signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SignalContext {
    /// Nothing captured.
    #[default]
    None,
    /// In-scope variable bindings at the raise site.
    Bindings(BTreeMap<String, Value>),
    /// A previously raised exception being re-recorded.
    Exception(ErrorException),
}

impl SignalContext {
    /// True for [`SignalContext::None`].
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<BTreeMap<String, Value>> for SignalContext {
    fn from(bindings: BTreeMap<String, Value>) -> Self {
        Self::Bindings(bindings)
    }
}

impl From<ErrorException> for SignalContext {
    fn from(exception: ErrorException) -> Self {
        Self::Exception(exception)
    }
}

/// One raised error.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSignal {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Location,
    pub context: SignalContext,
}

impl ErrorSignal {
    /// Signal with no location and no context.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: Location::unknown(),
            context: SignalContext::None,
        }
    }

    /// Set the originating file and line.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Location::new(file, line);
        self
    }

    /// Set the originating location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Attach ambient context.
    pub fn with_context(mut self, context: impl Into<SignalContext>) -> Self {
        self.context = context.into();
        self
    }
}
