//! Per-class rendering rules.
//!
//! One [`ClassRule`] per known [`ElementClass`], looked up once per node.
//! Unknown labels use [`FALLBACK`].

use boxnest_core::element::ElementClass;

use crate::layout::Direction;

/// Style class every element starts with.
const BASE_STYLE: &str = "relative";

/// How the style class list of an element is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StyleRule {
    /// Base style plus a fixed class list.
    Fixed(&'static str),
    /// Base style, `flex`, the inferred direction class, then a fixed list.
    Flex(&'static str),
    /// Base style only.
    Base,
}

impl StyleRule {
    pub(super) fn classes(self, direction: Direction) -> String {
        match self {
            StyleRule::Fixed(extra) => format!("{BASE_STYLE} {extra}"),
            StyleRule::Flex(extra) => {
                format!("{BASE_STYLE} flex {} {extra}", direction.flex_class())
            }
            StyleRule::Base => BASE_STYLE.to_string(),
        }
    }
}

/// What goes inside (or onto) the tag besides the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Placeholder {
    None,
    /// Literal text placed after the opening tag.
    Text(&'static str),
    /// `src`/`alt` attributes sized from the element's box.
    Image,
    /// `type`/`placeholder` attributes of a text field.
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ClassRule {
    pub(super) tag: &'static str,
    pub(super) style: StyleRule,
    pub(super) content: Placeholder,
    /// Self-closing tags never render children.
    pub(super) self_closing: bool,
}

impl ClassRule {
    const fn container(tag: &'static str, style: StyleRule) -> Self {
        Self {
            tag,
            style,
            content: Placeholder::None,
            self_closing: false,
        }
    }

    const fn text(tag: &'static str, style: &'static str, text: &'static str) -> Self {
        Self {
            tag,
            style: StyleRule::Fixed(style),
            content: Placeholder::Text(text),
            self_closing: false,
        }
    }

    const fn void(tag: &'static str, style: &'static str, content: Placeholder) -> Self {
        Self {
            tag,
            style: StyleRule::Fixed(style),
            content,
            self_closing: true,
        }
    }
}

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

/// Rule for labels outside the known set.
pub(super) const FALLBACK: ClassRule = ClassRule::container("div", StyleRule::Base);

const BUTTON: ClassRule = ClassRule::text(
    "button",
    "px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600",
    "Click me",
);
const DIV: ClassRule = ClassRule::container("div", StyleRule::Flex("gap-4"));
const FOOTER: ClassRule = ClassRule::container(
    "footer",
    StyleRule::Flex("items-center justify-between w-full bg-gray-100 p-4"),
);
const GRID: ClassRule = ClassRule::container("div", StyleRule::Fixed("grid grid-cols-3 gap-4"));
const HEADER: ClassRule = ClassRule::container(
    "header",
    StyleRule::Flex("items-center justify-between w-full bg-white p-4"),
);
const HEADING: ClassRule = ClassRule::text("h2", "text-2xl font-bold mb-4", "Sample Heading");
const ICON: ClassRule = ClassRule::container("div", StyleRule::Fixed("w-6 h-6"));
const IMAGE: ClassRule = ClassRule::void("img", "object-cover", Placeholder::Image);
const INPUT: ClassRule = ClassRule::void(
    "input",
    "border rounded px-3 py-2 focus:outline-none focus:ring-2",
    Placeholder::Input,
);
const LIST: ClassRule = ClassRule::container("div", StyleRule::Flex("gap-2"));
const PARAGRAPH: ClassRule = ClassRule::text("p", "text-gray-600 leading-relaxed", LOREM);
const SECTION: ClassRule = ClassRule::container("section", StyleRule::Flex("gap-6 p-6"));
/// A flex row that also carries placeholder text.
const SPAN: ClassRule = ClassRule {
    tag: "span",
    style: StyleRule::Flex("gap-2"),
    content: Placeholder::Text("Sample text"),
    self_closing: false,
};
const TEXT: ClassRule = ClassRule::text("span", "text-gray-800", "Sample text");

/// Looks up the rule for a class.
///
/// Only the known variants have rules; an `Other` label renders with
/// [`FALLBACK`] even when its text matches a known label.
pub(super) fn rule_for(class: &ElementClass) -> &'static ClassRule {
    match class {
        ElementClass::Button => &BUTTON,
        ElementClass::Div | ElementClass::DivBackground => &DIV,
        ElementClass::Footer => &FOOTER,
        ElementClass::Grid => &GRID,
        ElementClass::Header => &HEADER,
        ElementClass::Heading => &HEADING,
        ElementClass::Icon => &ICON,
        ElementClass::Image => &IMAGE,
        ElementClass::Input => &INPUT,
        ElementClass::List => &LIST,
        ElementClass::Paragraph => &PARAGRAPH,
        ElementClass::Section => &SECTION,
        ElementClass::Span => &SPAN,
        ElementClass::Text => &TEXT,
        ElementClass::Other(_) => &FALLBACK,
    }
}
