//! Diagnostics for reading annotation batches.
//!
//! Every [`Diagnostic`] carries an [`ErrorCode`], and the code decides its
//! [`Severity`]:
//!
//! - `E1xx`: the document as a whole is unreadable. Returned as a fatal
//!   [`ParseError`] and no elements are produced.
//! - `E2xx`: one annotation is unusable. It is skipped, the diagnostic lands
//!   in the batch's warnings, and reading continues.
//!
//! # Example
//!
//! ```
//! # use boxnest_parser::error::{Diagnostic, ErrorCode, Severity};
//! let diag = Diagnostic::new(ErrorCode::E201, "annotation #3 has a malformed bbox")
//!     .for_entry(3)
//!     .with_help("expected `[x1, y1, x2, y2]`");
//!
//! assert_eq!(diag.severity(), Severity::Warning);
//! assert_eq!(diag.entry(), Some(3));
//! ```

mod diagnostic;
mod error_code;
mod parse_error;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::{ErrorCode, Severity};
pub use parse_error::ParseError;
