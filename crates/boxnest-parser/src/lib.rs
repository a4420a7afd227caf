//! # Boxnest Parser
//!
//! Reads the annotation batch handed over by an upstream detector and turns
//! it into [`Element`](boxnest_core::element::Element)s.
//!
//! ## Usage
//!
//! ```
//! # use boxnest_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "annotations": [
//!             {"class": "header", "class_id": 4, "bbox": [0, 0, 100, 20]},
//!             {"class": "button", "class_id": 0, "bbox": [10, 5, 40, 15]}
//!         ]
//!     }"#;
//!
//!     let batch = parse(source)?;
//!     assert_eq!(batch.elements().len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;

mod annotations;
mod span;

pub use annotations::{ParsedBatch, parse};
pub use span::Span;
