//! Prelude module for common re-exports.
//!
//! ```rust
//! use err2exc_common::prelude::*;
//! ```

// ─── Kinds & Formatting ─────────────────────────────────────────────
pub use crate::exception::ErrorException;
pub use crate::format::{format_error_line, kind_label};
pub use crate::kind::{ErrorKind, Severity};
pub use crate::location::Location;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, ConfigProvider, DisplayErrors, Err2ExcConfig, LogLevel,
    PolicyConfig, RuntimeConfig, SharedConfig,
};
