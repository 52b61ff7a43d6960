//! Display labels and the single-line error record format.
//!
//! The line format is parsed by external tooling, so both the label table
//! and the layout are fixed:
//!
//! ```text
//! PHP User Error: disk full in /srv/app/upload.php on line 42
//! ```

use std::fmt::Write;

use static_assertions::const_assert_eq;

use crate::kind::ErrorKind;
use crate::location::Location;

/// Label used for any kind missing from [`KIND_LABELS`].
pub const UNKNOWN_LABEL: &str = "Unknown Error";

/// Runtime label placed in front of every line unless reconfigured.
pub const DEFAULT_RUNTIME_LABEL: &str = "PHP";

/// Kind → display label. Closed table: deprecations and combinations are
/// deliberately absent and fall back to [`UNKNOWN_LABEL`].
pub const KIND_LABELS: [(ErrorKind, &str); 13] = [
    (ErrorKind::ERROR, "Fatal Error"),
    (ErrorKind::WARNING, "Warning"),
    (ErrorKind::PARSE, "Parsing Error"),
    (ErrorKind::NOTICE, "Notice"),
    (ErrorKind::CORE_ERROR, "Core Error"),
    (ErrorKind::CORE_WARNING, "Core Warning"),
    (ErrorKind::COMPILE_ERROR, "Compile Error"),
    (ErrorKind::COMPILE_WARNING, "Compile Warning"),
    (ErrorKind::USER_ERROR, "User Error"),
    (ErrorKind::USER_WARNING, "User Warning"),
    (ErrorKind::USER_NOTICE, "User Notice"),
    (ErrorKind::STRICT, "Runtime Notice"),
    (ErrorKind::RECOVERABLE_ERROR, "Catchable Fatal Error"),
];

// Every kind except the two deprecation kinds has a label.
const_assert_eq!(KIND_LABELS.len(), ErrorKind::ALL.bits().count_ones() as usize - 2);

/// Look up the display label for an exact kind.
pub fn kind_label(kind: ErrorKind) -> &'static str {
    KIND_LABELS
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(UNKNOWN_LABEL, |(_, label)| *label)
}

/// Format one error record line.
///
/// An empty `runtime_label` drops the prefix and the line starts at the
/// display label. Missing file renders as `Unknown`, missing line as `0`.
pub fn format_error_line(
    runtime_label: &str,
    kind: ErrorKind,
    message: &str,
    location: &Location,
) -> String {
    let mut line = String::with_capacity(runtime_label.len() + message.len() + 48);
    if !runtime_label.is_empty() {
        line.push_str(runtime_label);
        line.push(' ');
    }
    // Writing into a String cannot fail.
    let _ = write!(
        line,
        "{}: {} in {} on line {}",
        kind_label(kind),
        message,
        location.file_or_unknown(),
        location.line_or_zero()
    );
    line
}
