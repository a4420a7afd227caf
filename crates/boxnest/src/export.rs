//! Export functionality for reconstructed element trees.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting an [`ElementTree`] into an output format. It is the final stage
//! in the Boxnest processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Annotation JSON
//!     ↓ parse
//! Elements
//!     ↓ structure
//! Element Tree
//!     ↓ layout (row/column per node)
//!     ↓ export (this module)
//! Markup
//! ```
//!
//! # Available Backends
//!
//! - [`html`] — HTML output via [`html::HtmlExporterBuilder`] and [`html::HtmlExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`BoxnestError::Export`] at the crate boundary.
//!
//! [`BoxnestError::Export`]: crate::BoxnestError::Export

/// HTML export backend.
pub mod html;

use std::fmt;

use crate::structure::ElementTree;

/// Abstraction for tree export backends.
pub trait Exporter {
    /// Exports the tree to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if writing into the output buffer fails.
    fn export_tree(&self, tree: &ElementTree) -> Result<String, Error>;
}

/// Errors that can occur during export.
///
/// Markup is assembled in memory, so the only failure is the formatter
/// refusing a write.
#[derive(Debug)]
pub enum Error {
    /// Writing into the output buffer failed.
    Format(fmt::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(err) => write!(f, "Format error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Format(err)
    }
}
