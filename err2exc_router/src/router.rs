//! The error router.
//!
//! [`ErrorRouter::handle`] runs three steps in fixed order:
//!
//! 1. Record the signal through the sink (see [`crate::sink`]). Never fails.
//! 2. Overwrite the last-error slot with the raw signal, even when step 3
//!    turns it into an exception.
//! 3. Classify the kind against the policy and return a [`Disposition`].
//!
//! The router performs no raise or exit itself; the caller acts on the
//! returned disposition.

use err2exc_common::config::{ConfigProvider, RuntimeConfig};
use err2exc_common::exception::ErrorException;
use tracing::debug;

use crate::last_error::LastError;
use crate::policy::{Classification, RoutingPolicy};
use crate::signal::ErrorSignal;
use crate::sink::{DiagnosticsSink, Recording, record_signal};

/// Process exit status for a terminating signal.
pub const TERMINATE_EXIT_CODE: i32 = 1;

/// What the caller must do with a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Proceed as if no custom handling happened.
    Continue,
    /// Raise this exception.
    Raise(ErrorException),
    /// Run shutdown hooks, then exit with this status.
    Terminate(i32),
}

impl Disposition {
    #[inline]
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Exception to raise, if any.
    pub fn exception(&self) -> Option<&ErrorException> {
        match self {
            Self::Raise(exception) => Some(exception),
            _ => None,
        }
    }

    /// Exit status, if the process must end.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Terminate(code) => Some(*code),
            _ => None,
        }
    }
}

/// Policy, runtime settings, sink and last-error slot for one execution
/// context.
#[derive(Debug)]
pub struct ErrorRouter<S, C = RuntimeConfig> {
    policy: RoutingPolicy,
    config: C,
    sink: S,
    last_error: Option<LastError>,
}

impl<S: DiagnosticsSink, C: ConfigProvider> ErrorRouter<S, C> {
    /// Router with the default policy.
    pub fn new(sink: S, config: C) -> Self {
        Self::with_policy(RoutingPolicy::default(), sink, config)
    }

    pub fn with_policy(policy: RoutingPolicy, sink: S, config: C) -> Self {
        Self {
            policy,
            config,
            sink,
            last_error: None,
        }
    }

    /// Route one signal.
    pub fn handle(&mut self, signal: ErrorSignal) -> Disposition {
        let recording = self.record(&signal);
        debug!(
            code = signal.kind.code(),
            logged = recording.logged,
            displayed = recording.displayed,
            "error signal recorded"
        );

        let last = self.last_error.insert(LastError::from_signal(signal));

        let disposition = match self.policy.classify(last.kind) {
            Classification::Rethrowable => Disposition::Raise(ErrorException::new(
                last.message.clone(),
                last.kind,
                last.location.clone(),
            )),
            Classification::Fatal => Disposition::Terminate(TERMINATE_EXIT_CODE),
            Classification::Continuable => Disposition::Continue,
        };
        debug!(code = last.kind.code(), ?disposition, "error signal routed");
        disposition
    }

    /// Record a signal through the sink without routing it or touching the
    /// last-error slot.
    pub fn record(&mut self, signal: &ErrorSignal) -> Recording {
        record_signal(&mut self.sink, &self.config, &self.policy, signal)
    }

    /// Stuff an exception into the last-error slot.
    pub fn record_exception(&mut self, exception: &ErrorException) {
        self.last_error = Some(LastError::from_exception(exception));
    }

    /// Most recently processed signal.
    pub fn last_error(&self) -> Option<&LastError> {
        self.last_error.as_ref()
    }

    pub fn take_last_error(&mut self) -> Option<LastError> {
        self.last_error.take()
    }

    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }

    /// Restore the default policy. The last-error slot is kept.
    pub fn reset(&mut self) {
        self.policy.reset();
    }

    pub fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut RoutingPolicy {
        &mut self.policy
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut C {
        &mut self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
