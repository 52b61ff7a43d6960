//! Originating location of a signal.

use serde::{Deserialize, Serialize};

/// Source file and line a signal was raised from. Both are best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Source file path.
    pub file: Option<String>,
    /// 1-based line number.
    pub line: Option<u32>,
}

impl Location {
    /// Location with both file and line known.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
        }
    }

    /// Location with nothing known.
    pub const fn unknown() -> Self {
        Self {
            file: None,
            line: None,
        }
    }

    /// File path, or `Unknown`.
    #[inline]
    pub fn file_or_unknown(&self) -> &str {
        self.file.as_deref().unwrap_or("Unknown")
    }

    /// Line number, or `0`.
    #[inline]
    pub fn line_or_zero(&self) -> u32 {
        self.line.unwrap_or(0)
    }
}
