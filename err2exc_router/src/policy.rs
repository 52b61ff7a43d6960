//! Routing policy: which kinds become exceptions and which end the process.
//!
//! ## Classification
//!
//! - **Rethrowable**: kind intersects the rethrow mask → `Raise`.
//! - **Fatal**: kind intersects the terminate mask (and not the rethrow
//!   mask) → `Terminate(1)`.
//! - **Continuable**: everything else → `Continue`.
//!
//! The rethrow mask is checked first, so a kind present in both masks is
//! rethrown.

use err2exc_common::config::PolicyConfig;
use err2exc_common::kind::ErrorKind;

/// Outcome class of a kind under a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Convert to an exception.
    Rethrowable,
    /// End the process.
    Fatal,
    /// Proceed normally.
    Continuable,
}

/// Mutable routing configuration owned by a router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingPolicy {
    /// Kinds converted to an exception.
    pub rethrow: ErrorKind,
    /// Kinds that end the process.
    pub terminate: ErrorKind,
    /// Log rethrown kinds as well. Off by default, since the exception is
    /// normally reported once it is caught or escapes.
    pub log_rethrown: bool,
}

impl RoutingPolicy {
    /// Restore the default masks and switches.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Classify a kind.
    #[inline]
    pub fn classify(&self, kind: ErrorKind) -> Classification {
        if kind.intersects(self.rethrow) {
            Classification::Rethrowable
        } else if kind.intersects(self.terminate) {
            Classification::Fatal
        } else {
            Classification::Continuable
        }
    }

    /// Whether an eligible signal of `kind` may go to the log channel.
    ///
    /// Logged when the kind has any bit outside the rethrow mask, or when
    /// rethrown kinds are logged too.
    #[inline]
    pub fn should_log(&self, kind: ErrorKind) -> bool {
        !kind.difference(self.rethrow).is_empty() || self.log_rethrown
    }
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self::from(PolicyConfig::default())
    }
}

impl From<PolicyConfig> for RoutingPolicy {
    fn from(config: PolicyConfig) -> Self {
        Self {
            rethrow: config.rethrow,
            terminate: config.terminate,
            log_rethrown: config.log_rethrown,
        }
    }
}
