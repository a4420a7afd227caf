//! Detected UI elements.
//!
//! An [`Element`] is one detection: a class label, the detector's optional
//! numeric class id, and its [`BBox`]. Tree edges are owned by the hierarchy,
//! not by the element.

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::geometry::BBox;

/// The UI-element class reported by the detector.
///
/// Labels outside the known set are kept verbatim in [`ElementClass::Other`]
/// so they can be traced back to the original detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementClass {
    Button,
    Div,
    /// A background panel; laid out like [`ElementClass::Div`].
    DivBackground,
    Footer,
    Grid,
    Header,
    Heading,
    Icon,
    Image,
    Input,
    List,
    Paragraph,
    Section,
    Span,
    Text,
    Other(String),
}

impl ElementClass {
    /// Returns the class for a detector label. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label {
            "button" => Self::Button,
            "div" => Self::Div,
            "div-bg" => Self::DivBackground,
            "footer" => Self::Footer,
            "grid" => Self::Grid,
            "header" => Self::Header,
            "heading" => Self::Heading,
            "icon" => Self::Icon,
            "image" => Self::Image,
            "input" => Self::Input,
            "list" => Self::List,
            "paragraph" => Self::Paragraph,
            "section" => Self::Section,
            "span" => Self::Span,
            "text" => Self::Text,
            other => {
                trace!(label = other; "Unrecognized element class");
                Self::Other(other.to_string())
            }
        }
    }

    /// Returns the detector label this class was created from.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Button => "button",
            Self::Div => "div",
            Self::DivBackground => "div-bg",
            Self::Footer => "footer",
            Self::Grid => "grid",
            Self::Header => "header",
            Self::Heading => "heading",
            Self::Icon => "icon",
            Self::Image => "image",
            Self::Input => "input",
            Self::List => "list",
            Self::Paragraph => "paragraph",
            Self::Section => "section",
            Self::Span => "span",
            Self::Text => "text",
            Self::Other(label) => label,
        }
    }

    /// Returns true if the label is not one of the known classes.
    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl From<String> for ElementClass {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<&str> for ElementClass {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<ElementClass> for String {
    fn from(class: ElementClass) -> Self {
        match class {
            ElementClass::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    class: ElementClass,
    #[serde(default)]
    class_id: Option<u32>,
    bbox: BBox,
}

impl Element {
    /// Creates an element without a class id.
    pub fn new(class: impl Into<ElementClass>, bbox: BBox) -> Self {
        Self {
            class: class.into(),
            class_id: None,
            bbox,
        }
    }

    /// Sets the detector's numeric class id.
    pub fn with_class_id(mut self, class_id: u32) -> Self {
        self.class_id = Some(class_id);
        self
    }

    pub fn class(&self) -> &ElementClass {
        &self.class
    }

    pub fn class_id(&self) -> Option<u32> {
        self.class_id
    }

    pub fn bbox(&self) -> BBox {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_round_trip() {
        let labels = [
            "button",
            "div",
            "div-bg",
            "footer",
            "grid",
            "header",
            "heading",
            "icon",
            "image",
            "input",
            "list",
            "paragraph",
            "section",
            "span",
            "text",
        ];

        for label in labels {
            let class = ElementClass::from_label(label);
            assert!(!class.is_other(), "{label} should be a known class");
            assert_eq!(class.as_str(), label);
        }
    }

    #[test]
    fn test_unknown_label_is_kept() {
        let class = ElementClass::from_label("carousel");
        assert_eq!(class, ElementClass::Other("carousel".to_string()));
        assert_eq!(class.to_string(), "carousel");
        assert_eq!(String::from(class), "carousel");
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!(ElementClass::from_label("Button").is_other());
    }

    #[test]
    fn test_element_builder() {
        let element = Element::new("header", BBox::new(0, 0, 100, 20)).with_class_id(4);

        assert_eq!(element.class(), &ElementClass::Header);
        assert_eq!(element.class_id(), Some(4));
        assert_eq!(element.bbox(), BBox::new(0, 0, 100, 20));
    }
}
