//! Miette rendering for [`BoxnestError`].
//!
//! A parse failure carries one diagnostic per rejected annotation (or a single
//! syntax diagnostic) and becomes one [`Report`] each, pointing into the
//! annotation source. Every other failure becomes a single source-less report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use boxnest::BoxnestError;
use boxnest_parser::error::{Diagnostic, Severity};

/// One renderable problem.
#[derive(Debug)]
pub enum Report<'a> {
    /// A diagnostic about the annotation source.
    Annotation { diag: &'a Diagnostic, src: &'a str },
    /// A failure outside the annotation source.
    Failure(&'a BoxnestError),
}

/// Split an error into the reports the CLI prints.
pub fn reports(err: &BoxnestError) -> Vec<Report<'_>> {
    match err {
        BoxnestError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Report::Annotation { diag, src })
            .collect(),
        _ => vec![Report::Failure(err)],
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Annotation { diag, .. } => match diag.entry() {
                Some(index) => write!(f, "annotation #{index}: {}", diag.message()),
                None => f.write_str(diag.message()),
            },
            Report::Failure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Report::Annotation { .. } => None,
            Report::Failure(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            Report::Annotation { diag, .. } => diag.code().as_str(),
            Report::Failure(BoxnestError::Io(_)) => "boxnest::io",
            Report::Failure(BoxnestError::Config(_)) => "boxnest::config",
            Report::Failure(BoxnestError::Rejected(_)) => "boxnest::rejected",
            Report::Failure(BoxnestError::Export(_)) => "boxnest::export",
            Report::Failure(BoxnestError::Parse { .. }) => return None,
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        let severity = match self {
            Report::Annotation { diag, .. } => diag.severity(),
            Report::Failure(_) => Severity::Error,
        };
        Some(match severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Annotation { diag, .. } => diag
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display>),
            Report::Failure(BoxnestError::Rejected(_)) => Some(Box::new(
                "fix the offending annotations or run without --strict",
            )),
            Report::Failure(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Report::Annotation { src, .. } => Some(src as &dyn miette::SourceCode),
            Report::Failure(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Report::Annotation { diag, .. } = self else {
            return None;
        };
        let label = diag.label()?;
        let span = SourceSpan::new(label.span().start().into(), label.span().len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(label.message().to_string()), span),
        )))
    }
}
