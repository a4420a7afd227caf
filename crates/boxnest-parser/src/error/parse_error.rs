//! The error returned when a batch cannot be accepted.

use std::fmt;

use crate::error::{Diagnostic, Severity};

/// A batch that could not be accepted.
///
/// Either the document was unreadable, in which case it holds the single
/// fatal diagnostic, or a caller that tolerates no losses turned the
/// warnings of an otherwise readable batch into an error.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Rejects a batch because of its skipped entries.
    pub fn from_warnings(warnings: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics: warnings,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True when the document itself was unreadable.
    pub fn is_fatal(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity() == Severity::Error)
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diagnostics.as_slice() {
            [] => f.write_str("annotation batch rejected"),
            [only] => write!(f, "{only}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}

impl std::error::Error for ParseError {}
