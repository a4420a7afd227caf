//! Error types for Boxnest operations.
//!
//! This module provides the main error type [`BoxnestError`] which wraps
//! the error conditions that can occur while turning annotations into markup.

use std::io;

use thiserror::Error;

use boxnest_parser::error::ParseError;

/// The main error type for Boxnest operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so callers can render labeled snippets.
#[derive(Debug, Error)]
pub enum BoxnestError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Input was accepted with losses that strict mode does not allow.
    #[error("Rejected input: {0}")]
    Rejected(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for BoxnestError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl BoxnestError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
