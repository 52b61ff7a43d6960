//! Single-slot record of the most recently processed signal.
//!
//! Installing a custom handler switches off the host's own last-error
//! bookkeeping, so the router keeps it instead. The slot is overwritten on
//! every signal, including signals that end up rethrown.

use err2exc_common::exception::ErrorException;
use err2exc_common::kind::ErrorKind;
use err2exc_common::location::Location;
use serde::Serialize;

use crate::signal::{ErrorSignal, SignalContext};

/// Last observed error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Location,
    pub context: SignalContext,
    /// Set only for records injected from an exception.
    pub was_exception: bool,
}

impl LastError {
    /// Record for a signal processed by the router.
    pub fn from_signal(signal: ErrorSignal) -> Self {
        Self {
            kind: signal.kind,
            message: signal.message,
            location: signal.location,
            context: signal.context,
            was_exception: false,
        }
    }

    /// Record for an exception stuffed into the slot by the caller. The
    /// exception itself becomes the context.
    pub fn from_exception(exception: &ErrorException) -> Self {
        Self {
            kind: exception.kind(),
            message: exception.message.clone(),
            location: exception.location.clone(),
            context: SignalContext::Exception(exception.clone()),
            was_exception: true,
        }
    }
}
