//! Error codes for annotation diagnostics.

use std::fmt;

/// How bad a diagnostic is, derived from its [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The batch could not be read.
    Error,
    /// One annotation was skipped.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Stable identifiers for everything the reader can complain about.
///
/// `E1xx` codes concern the whole document, `E2xx` codes a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid JSON syntax.
    E100,

    /// The input ended before the JSON document was complete.
    E101,

    /// The document is neither an array of annotations nor an object with an
    /// `annotations` array.
    E102,

    /// Missing or non-string `class` field.
    E200,

    /// Missing `bbox`, or not an array of exactly four numbers.
    E201,

    /// A `bbox` coordinate is not an integer that fits in 32 bits.
    E202,

    /// `class_id` is present but not a non-negative 32-bit integer.
    E203,

    /// The entry is not a JSON object.
    E204,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Document codes are errors, entry codes are warnings.
    pub fn severity(&self) -> Severity {
        match self {
            ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 => Severity::Error,
            ErrorCode::E200
            | ErrorCode::E201
            | ErrorCode::E202
            | ErrorCode::E203
            | ErrorCode::E204 => Severity::Warning,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
