//! Reading a batch of annotations from JSON.
//!
//! The accepted document is either
//!
//! ```json
//! { "annotations": [ { "class": "button", "class_id": 0, "bbox": [10, 5, 40, 15] } ] }
//! ```
//!
//! or the bare array of entries. Each entry is checked on its own; a bad
//! entry becomes a warning and is skipped.

use log::{debug, trace, warn};
use serde_json::{Map, Value, error::Category};
use thiserror::Error;

use boxnest_core::{
    element::{Element, ElementClass},
    geometry::BBox,
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

/// Key of the annotation list in an object document.
const ANNOTATIONS_KEY: &str = "annotations";

/// Elements read from a batch, plus warnings for skipped entries.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    elements: Vec<Element>,
    warnings: Vec<Diagnostic>,
}

impl ParsedBatch {
    /// Elements in input order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// One warning per skipped entry.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<Element>, Vec<Diagnostic>) {
        (self.elements, self.warnings)
    }
}

/// Why one entry was skipped.
#[derive(Debug, Error)]
enum EntryError {
    #[error("annotation #{0} is not an object")]
    NotAnObject(usize),

    #[error("annotation #{0} has no `class` string")]
    MissingClass(usize),

    #[error("annotation #{0} has a malformed bbox")]
    MalformedBox(usize),

    #[error("annotation #{index} has an invalid bbox coordinate: {reason}")]
    InvalidCoordinate { index: usize, reason: String },

    #[error("annotation #{0} has an invalid `class_id`")]
    InvalidClassId(usize),
}

impl EntryError {
    fn code(&self) -> ErrorCode {
        match self {
            EntryError::NotAnObject(_) => ErrorCode::E204,
            EntryError::MissingClass(_) => ErrorCode::E200,
            EntryError::MalformedBox(_) => ErrorCode::E201,
            EntryError::InvalidCoordinate { .. } => ErrorCode::E202,
            EntryError::InvalidClassId(_) => ErrorCode::E203,
        }
    }

    fn help(&self) -> &'static str {
        match self {
            EntryError::NotAnObject(_) => "each annotation must be a JSON object",
            EntryError::MissingClass(_) => "add a `class` field such as \"button\"",
            EntryError::MalformedBox(_) => "expected `bbox: [x1, y1, x2, y2]`",
            EntryError::InvalidCoordinate { .. } => "coordinates must be whole pixel values",
            EntryError::InvalidClassId(_) => "`class_id` must be a non-negative integer",
        }
    }

    fn index(&self) -> usize {
        match self {
            EntryError::NotAnObject(index)
            | EntryError::MissingClass(index)
            | EntryError::MalformedBox(index)
            | EntryError::InvalidClassId(index)
            | EntryError::InvalidCoordinate { index, .. } => *index,
        }
    }

    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::new(self.code(), self.to_string())
            .for_entry(self.index())
            .with_help(self.help())
    }
}

/// Sink for the entries a batch could not use.
#[derive(Debug, Default)]
struct SkippedEntries {
    warnings: Vec<Diagnostic>,
}

impl SkippedEntries {
    fn skip(&mut self, err: EntryError) {
        warn!(
            index = err.index(),
            code = err.code().as_str(),
            reason = err.to_string();
            "Skipping annotation"
        );
        self.warnings.push(err.into_diagnostic());
    }
}

/// Read an annotation batch.
///
/// # Errors
///
/// Returns [`ParseError`] when the source is not valid JSON or does not hold
/// an annotation list. Problems with individual entries are reported as
/// warnings in the returned [`ParsedBatch`].
pub fn parse(source: &str) -> Result<ParsedBatch, ParseError> {
    let document: Value = serde_json::from_str(source).map_err(|err| json_error(source, &err))?;

    let entries = annotation_list(&document).ok_or_else(|| {
        Diagnostic::new(ErrorCode::E102, "no annotation list found")
            .with_label(Span::new(0..source.len().min(1)), "document starts here")
            .with_help("expected `{\"annotations\": [...]}` or a top-level array")
    })?;

    debug!(entries = entries.len(); "Reading annotations");

    let mut skipped = SkippedEntries::default();
    let mut elements = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(index, entry) {
            Ok(element) => {
                trace!(index = index, class = element.class().as_str(); "Read annotation");
                elements.push(element);
            }
            Err(err) => skipped.skip(err),
        }
    }

    let warnings = skipped.warnings;

    debug!(accepted = elements.len(), skipped = warnings.len(); "Annotations read");

    Ok(ParsedBatch { elements, warnings })
}

fn annotation_list(document: &Value) -> Option<&Vec<Value>> {
    match document {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map.get(ANNOTATIONS_KEY).and_then(Value::as_array),
        _ => None,
    }
}

fn parse_entry(index: usize, entry: &Value) -> Result<Element, EntryError> {
    let object = entry.as_object().ok_or(EntryError::NotAnObject(index))?;

    let class = object
        .get("class")
        .and_then(Value::as_str)
        .map(ElementClass::from_label)
        .ok_or(EntryError::MissingClass(index))?;

    let bbox = parse_bbox(index, object)?;

    let element = Element::new(class, bbox);
    match parse_class_id(index, object)? {
        Some(class_id) => Ok(element.with_class_id(class_id)),
        None => Ok(element),
    }
}

fn parse_bbox(index: usize, object: &Map<String, Value>) -> Result<BBox, EntryError> {
    let value = object.get("bbox").ok_or(EntryError::MalformedBox(index))?;

    match value.as_array() {
        Some(coords) if coords.len() == 4 && coords.iter().all(Value::is_number) => {}
        _ => return Err(EntryError::MalformedBox(index)),
    }

    serde_json::from_value::<BBox>(value.clone()).map_err(|err| EntryError::InvalidCoordinate {
        index,
        reason: err.to_string(),
    })
}

fn parse_class_id(index: usize, object: &Map<String, Value>) -> Result<Option<u32>, EntryError> {
    match object.get("class_id") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .map(Some)
            .ok_or(EntryError::InvalidClassId(index)),
    }
}

fn json_error(source: &str, err: &serde_json::Error) -> ParseError {
    let span = Span::at_line_column(source, err.line(), err.column());
    let (code, label) = match err.classify() {
        Category::Eof => (ErrorCode::E101, "input ends here"),
        _ => (ErrorCode::E100, "here"),
    };

    Diagnostic::new(code, format!("invalid JSON: {err}"))
        .with_label(span, label)
        .into()
}

#[cfg(test)]
mod tests {
    use crate::error::Severity;

    use super::*;

    #[test]
    fn test_parse_object_document() {
        let source = r#"{
            "annotations": [
                {"class": "header", "class_id": 4, "bbox": [0, 0, 100, 20]},
                {"class": "button", "class_id": 0, "bbox": [10, 5, 40, 15]}
            ]
        }"#;

        let batch = parse(source).expect("valid batch");

        assert_eq!(batch.elements().len(), 2);
        assert!(batch.warnings().is_empty());
        assert_eq!(batch.elements()[0].class(), &ElementClass::Header);
        assert_eq!(batch.elements()[0].class_id(), Some(4));
        assert_eq!(batch.elements()[1].bbox(), BBox::new(10, 5, 40, 15));
    }

    #[test]
    fn test_parse_bare_array() {
        let source = r#"[{"class": "image", "bbox": [0, 0, 50, 50]}]"#;

        let batch = parse(source).expect("valid batch");

        assert_eq!(batch.elements().len(), 1);
        assert_eq!(batch.elements()[0].class_id(), None);
    }

    #[test]
    fn test_parse_empty_list() {
        let batch = parse(r#"{"annotations": []}"#).expect("valid batch");
        assert!(batch.elements().is_empty());
        assert!(batch.warnings().is_empty());
    }

    #[test]
    fn test_unknown_class_is_kept() {
        let batch = parse(r#"[{"class": "carousel", "bbox": [0, 0, 5, 5]}]"#).unwrap();
        assert!(batch.elements()[0].class().is_other());
    }

    #[test]
    fn test_inverted_box_is_not_a_parse_warning() {
        // Geometry is checked by the hierarchy builder, not the reader.
        let batch = parse(r#"[{"class": "div", "bbox": [50, 50, 10, 10]}]"#).unwrap();
        assert_eq!(batch.elements().len(), 1);
        assert!(batch.warnings().is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let source = r#"{"annotations": [
            {"class": "header", "bbox": [0, 0, 100, 20]},
            {"bbox": [0, 0, 1, 1]},
            {"class": "button", "bbox": [0, 0, 1]},
            {"class": "button", "bbox": [0, 0, 1.5, 1]},
            {"class": "button", "bbox": [0, 0, 1, 1], "class_id": -2},
            "not an object",
            {"class": "text", "bbox": [1, 1, 5, 5]}
        ]}"#;

        let batch = parse(source).expect("entry problems are not fatal");

        let classes: Vec<_> = batch.elements().iter().map(|e| e.class().as_str()).collect();
        assert_eq!(classes, ["header", "text"]);

        let codes: Vec<_> = batch.warnings().iter().map(|d| d.code()).collect();
        assert_eq!(
            codes,
            [
                ErrorCode::E200,
                ErrorCode::E201,
                ErrorCode::E202,
                ErrorCode::E203,
                ErrorCode::E204,
            ]
        );
        let entries: Vec<_> = batch.warnings().iter().map(|d| d.entry()).collect();
        assert_eq!(entries, [Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert!(
            batch
                .warnings()
                .iter()
                .all(|d| d.severity() == Severity::Warning)
        );
        assert_eq!(batch.warnings()[0].message(), "annotation #1 has no `class` string");
    }

    #[test]
    fn test_coordinate_out_of_range() {
        let source = r#"[{"class": "div", "bbox": [0, 0, 1, 99999999999]}]"#;
        let batch = parse(source).unwrap();

        assert!(batch.elements().is_empty());
        assert_eq!(batch.warnings()[0].code(), ErrorCode::E202);
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let source = "{\"annotations\": [,]}";
        let err = parse(source).unwrap_err();

        assert!(err.is_fatal());
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), ErrorCode::E100);
        let span = diag.label().expect("syntax errors are located").span();
        assert_eq!(&source[span.start()..span.end()], ",");
    }

    #[test]
    fn test_invalid_escape_before_multibyte_char() {
        let source = "[\"\\u12\u{e9}\"]";
        let err = parse(source).unwrap_err();

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), ErrorCode::E100);
        let span = diag.label().unwrap().span();
        assert!(source.is_char_boundary(span.start()));
        assert!(source.is_char_boundary(span.end()));
    }

    #[test]
    fn test_truncated_json_is_fatal() {
        let err = parse("{\"annotations\": [").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), ErrorCode::E101);
    }

    #[test]
    fn test_missing_annotation_list_is_fatal() {
        let err = parse(r#"{"boxes": []}"#).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), ErrorCode::E102);

        let err = parse("42").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), ErrorCode::E102);
    }
}
