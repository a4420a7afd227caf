//! A single problem found while reading a batch.

use std::fmt;

use crate::{
    error::{ErrorCode, Severity},
    span::Span,
};

/// A message pinned to a byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One problem with an annotation batch.
///
/// Document-level problems point at the offending bytes through a [`Label`].
/// Entry-level problems instead name the position of the skipped annotation,
/// since the decoded entries no longer know where they came from.
///
/// ```text
/// warning[E201]: annotation #3 has a malformed bbox
///    = help: expected `bbox: [x1, y1, x2, y2]`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    label: Option<Label>,
    entry: Option<usize>,
    help: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic whose severity follows from `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            label: None,
            entry: None,
            help: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location in the source, for document-level problems.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Index of the skipped annotation, for entry-level problems.
    pub fn entry(&self) -> Option<usize> {
        self.entry
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.label = Some(Label {
            span,
            message: message.into(),
        });
        self
    }

    pub fn for_entry(mut self, index: usize) -> Self {
        self.entry = Some(index);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity(), self.code, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_diagnostic() {
        let diag = Diagnostic::new(ErrorCode::E100, "invalid JSON: trailing comma")
            .with_label(Span::new(41..42), "here");

        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.entry(), None);
        let label = diag.label().unwrap();
        assert_eq!(label.span(), Span::new(41..42));
        assert_eq!(label.message(), "here");
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_entry_diagnostic() {
        let diag = Diagnostic::new(ErrorCode::E200, "annotation #0 has no `class` string")
            .for_entry(0)
            .with_help("add a `class` field");

        assert_eq!(diag.severity(), Severity::Warning);
        assert_eq!(diag.entry(), Some(0));
        assert!(diag.label().is_none());
        assert_eq!(diag.help(), Some("add a `class` field"));
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::new(ErrorCode::E201, "annotation #2 has a malformed bbox");
        assert_eq!(
            diag.to_string(),
            "warning[E201]: annotation #2 has a malformed bbox"
        );
    }
}
