//! Legacy error kinds as a typed bitflag set.
//!
//! Each raised signal carries one kind (a single bit). Routing masks are
//! sets of kinds and all classification is an `intersects` test against
//! such a set, never raw integer arithmetic at the call site.
//!
//! The numeric values are the legacy runtime codes, so `code()` and
//! `from_code()` round-trip with whatever a host hands us.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;
use thiserror::Error;

bitflags! {
    /// Legacy error categories.
    ///
    /// Fatal kinds: ERROR, PARSE, CORE_ERROR, COMPILE_ERROR, USER_ERROR.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ErrorKind: u32 {
        /// Fatal run-time error.
        const ERROR             = 0x0001;
        /// Run-time warning.
        const WARNING           = 0x0002;
        /// Compile-time parse error.
        const PARSE             = 0x0004;
        /// Run-time notice.
        const NOTICE            = 0x0008;
        /// Fatal error during startup.
        const CORE_ERROR        = 0x0010;
        /// Warning during startup.
        const CORE_WARNING      = 0x0020;
        /// Fatal compile-time error.
        const COMPILE_ERROR     = 0x0040;
        /// Compile-time warning.
        const COMPILE_WARNING   = 0x0080;
        /// User-raised error.
        const USER_ERROR        = 0x0100;
        /// User-raised warning.
        const USER_WARNING      = 0x0200;
        /// User-raised notice.
        const USER_NOTICE       = 0x0400;
        /// Strict-standards / runtime notice.
        const STRICT            = 0x0800;
        /// Catchable fatal error.
        const RECOVERABLE_ERROR = 0x1000;
        /// Deprecation notice (no display label).
        const DEPRECATED        = 0x2000;
        /// User-raised deprecation notice (no display label).
        const USER_DEPRECATED   = 0x4000;
        /// Every kind above.
        const ALL               = 0x7FFF;
    }
}

const_assert_eq!(ErrorKind::ALL.bits(), (ErrorKind::USER_DEPRECATED.bits() << 1) - 1);

impl ErrorKind {
    /// Kinds that end execution in the host's own model.
    pub const FATAL: Self = Self::from_bits_truncate(
        Self::ERROR.bits()
            | Self::PARSE.bits()
            | Self::CORE_ERROR.bits()
            | Self::COMPILE_ERROR.bits()
            | Self::USER_ERROR.bits(),
    );

    /// Warning-class kinds.
    pub const WARNINGS: Self = Self::from_bits_truncate(
        Self::WARNING.bits()
            | Self::CORE_WARNING.bits()
            | Self::COMPILE_WARNING.bits()
            | Self::USER_WARNING.bits(),
    );

    /// Kinds converted to an exception unless reconfigured.
    pub const DEFAULT_RETHROW: Self = Self::from_bits_truncate(
        Self::WARNING.bits() | Self::USER_WARNING.bits() | Self::RECOVERABLE_ERROR.bits(),
    );

    /// Kinds that terminate the process unless reconfigured.
    pub const DEFAULT_TERMINATE: Self = Self::USER_ERROR;

    /// Wrap a raw legacy code. Unknown bits are retained, not dropped.
    #[inline]
    pub const fn from_code(code: u32) -> Self {
        Self::from_bits_retain(code)
    }

    /// Raw legacy code.
    #[inline]
    pub const fn code(self) -> u32 {
        self.bits()
    }

    /// Severity class used to pick a log level.
    pub const fn severity(self) -> Severity {
        if self.intersects(Self::FATAL) || self.intersects(Self::RECOVERABLE_ERROR) {
            Severity::Fatal
        } else if self.intersects(Self::WARNINGS) {
            Severity::Warning
        } else {
            Severity::Notice
        }
    }

    /// Parse a kind from user input.
    ///
    /// Accepts a decimal or `0x` hex code, or names joined by `|`. A name may
    /// carry the `E_` prefix and may be written in any case with `-` for `_`:
    /// `E_USER_ERROR`, `USER_ERROR` and `user-error` are the same kind.
    pub fn parse(input: &str) -> Result<Self, KindParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(KindParseError::Empty);
        }

        let mut kind = Self::empty();
        for part in input.split('|') {
            kind |= Self::parse_one(part.trim())?;
        }
        Ok(kind)
    }

    fn parse_one(part: &str) -> Result<Self, KindParseError> {
        if part.is_empty() {
            return Err(KindParseError::Empty);
        }
        if let Some(hex) = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
            return u32::from_str_radix(hex, 16)
                .map(Self::from_code)
                .map_err(|_| KindParseError::InvalidCode(part.to_string()));
        }
        if part.bytes().all(|b| b.is_ascii_digit()) {
            return part
                .parse::<u32>()
                .map(Self::from_code)
                .map_err(|_| KindParseError::InvalidCode(part.to_string()));
        }

        let name = part.to_ascii_uppercase().replace('-', "_");
        let name = name.strip_prefix("E_").unwrap_or(&name);
        Self::from_name(name).ok_or_else(|| KindParseError::UnknownName(part.to_string()))
    }
}

impl Default for ErrorKind {
    fn default() -> Self {
        Self::empty()
    }
}

/// Coarse severity of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal or catchable-fatal.
    Fatal,
    /// Any warning kind.
    Warning,
    /// Notices, strict, deprecations and unknown kinds.
    Notice,
}

/// Error returned by [`ErrorKind::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KindParseError {
    /// Empty input or an empty `|` segment.
    #[error("empty error kind")]
    Empty,

    /// Numeric code that does not fit in 32 bits.
    #[error("invalid error code: {0}")]
    InvalidCode(String),

    /// Name that is not a known kind.
    #[error("unknown error kind: {0}")]
    UnknownName(String),
}
