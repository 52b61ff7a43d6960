//! # err2exc Router Library
//!
//! Routes legacy error signals to one of three outcomes: convert to a
//! catchable exception, terminate the process, or continue normally.
//!
//! ## Pipeline
//!
//! 1. **Record** — gated write to the diagnostics sink ([`sink`])
//! 2. **Remember** — overwrite the last-error slot ([`last_error`])
//! 3. **Classify** — rethrow mask, then terminate mask ([`policy`])
//!
//! [`router::ErrorRouter`] owns all state for one execution context and
//! returns a [`router::Disposition`]; [`handler`] installs a router per
//! thread as the sole error hook and acts on that disposition.

pub mod handler;
pub mod last_error;
pub mod policy;
pub mod router;
pub mod signal;
pub mod sink;

pub use router::{Disposition, ErrorRouter, TERMINATE_EXIT_CODE};
pub use signal::{ErrorSignal, SignalContext};
