//! HTML export of element trees.
//!
//! Each element becomes one tag chosen from the per-class rule table. Children
//! are written in the order given by their parent's [`Arrangement`]; the
//! sentinel root contributes only its children.

mod rules;

use std::{borrow::Cow, fmt::Write};

use log::{debug, info};

use boxnest_core::{element::Element, geometry::BBox};

use super::{Error, Exporter};
use crate::{
    config::{DocumentConfig, RenderConfig},
    layout::Arrangement,
    structure::{ElementTree, NodeId, NodeKind},
};

use rules::{ClassRule, Placeholder, rule_for};

/// Builder for [`HtmlExporter`].
#[derive(Debug, Default)]
pub struct HtmlExporterBuilder {
    render: RenderConfig,
    document: Option<DocumentConfig>,
}

impl HtmlExporterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_config(mut self, render: &RenderConfig) -> Self {
        self.render = render.clone();
        self
    }

    /// Wraps the output in a full HTML document.
    pub fn with_document(mut self, document: &DocumentConfig) -> Self {
        self.document = Some(document.clone());
        self
    }

    pub fn build(self) -> HtmlExporter {
        HtmlExporter {
            render: self.render,
            document: self.document,
        }
    }
}

/// Renders an [`ElementTree`] as HTML.
///
/// Without a document configuration the output is a bare fragment, one tag
/// per line, indented by nesting depth.
#[derive(Debug)]
pub struct HtmlExporter {
    render: RenderConfig,
    document: Option<DocumentConfig>,
}

impl HtmlExporter {
    /// Renders only the markup fragment, ignoring any document settings.
    pub fn render_fragment(&self, tree: &ElementTree) -> Result<String, Error> {
        let mut out = String::new();
        self.write_node(&mut out, tree, tree.root(), 0)?;
        Ok(out)
    }

    /// Renders the fragment wrapped in the HTML document shell.
    ///
    /// Uses the configured document settings, or the defaults when the
    /// exporter was built without them.
    pub fn render_document(&self, tree: &ElementTree) -> Result<String, Error> {
        let fragment = self.render_fragment(tree)?;
        let default_document;
        let document = match &self.document {
            Some(document) => document,
            None => {
                default_document = DocumentConfig::default();
                &default_document
            }
        };

        let mut out = String::with_capacity(fragment.len() + 512);
        write_document(&mut out, document, &fragment)?;
        Ok(out)
    }

    fn write_node(
        &self,
        out: &mut String,
        tree: &ElementTree,
        id: NodeId,
        depth: usize,
    ) -> Result<(), Error> {
        let arrangement = Arrangement::of(tree, id);

        let element = match tree.kind(id) {
            NodeKind::Root => {
                for &child in arrangement.children() {
                    self.write_node(out, tree, child, depth)?;
                }
                return Ok(());
            }
            NodeKind::Element(element) => element,
        };

        let rule = rule_for(element.class());
        let indent = depth * self.render.indent_width();
        let classes = rule.style.classes(arrangement.direction());

        write!(out, "{:indent$}<{}", "", rule.tag)?;
        self.write_placeholder_attributes(out, rule, element.bbox())?;
        write!(out, " class='{}'", escape_attribute(&classes))?;
        write_identity_attributes(out, element)?;
        out.push('>');
        if let Placeholder::Text(text) = rule.content {
            out.push_str(text);
        }
        out.push('\n');

        if rule.self_closing {
            if !arrangement.children().is_empty() {
                debug!(
                    class = element.class().as_str(),
                    dropped = arrangement.children().len();
                    "Self-closing element has children; skipping them"
                );
            }
            return Ok(());
        }

        for &child in arrangement.children() {
            self.write_node(out, tree, child, depth + 1)?;
        }
        writeln!(out, "{:indent$}</{}>", "", rule.tag)?;
        Ok(())
    }

    fn write_placeholder_attributes(
        &self,
        out: &mut String,
        rule: &ClassRule,
        bbox: BBox,
    ) -> Result<(), Error> {
        match rule.content {
            Placeholder::Image => {
                let (width, height) = self.image_dimensions(bbox);
                write!(
                    out,
                    " src='{}/{width}/{height}?random=1' alt='Placeholder'",
                    escape_attribute(self.render.placeholder_image_base())
                )?;
            }
            Placeholder::Input => {
                out.push_str(" type='text' placeholder='Enter text here...'");
            }
            Placeholder::None | Placeholder::Text(_) => {}
        }
        Ok(())
    }

    /// Box size in pixels, with non-positive sides replaced by the
    /// configured minimum.
    fn image_dimensions(&self, bbox: BBox) -> (u32, u32) {
        let fallback = self.render.min_image_dimension();
        let side = |value: i64| {
            u32::try_from(value)
                .ok()
                .filter(|&v| v > 0)
                .unwrap_or(fallback)
        };
        let size = bbox.size();
        (side(size.width()), side(size.height()))
    }
}

impl Exporter for HtmlExporter {
    fn export_tree(&self, tree: &ElementTree) -> Result<String, Error> {
        info!(
            elements = tree.len(),
            document = self.document.is_some();
            "Rendering HTML"
        );
        if self.document.is_some() {
            self.render_document(tree)
        } else {
            self.render_fragment(tree)
        }
    }
}

/// Writes the HTML shell around `body`.
fn write_document(out: &mut String, document: &DocumentConfig, body: &str) -> Result<(), Error> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"{}\">", escape_attribute(document.lang()))?;
    writeln!(out, "<head>")?;
    writeln!(out, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(out, "    <title>{}</title>", escape_text(document.title()))?;
    if let Some(src) = document.stylesheet_script() {
        writeln!(out, "    <script src=\"{}\"></script>", escape_attribute(src))?;
    }
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    out.push_str(body);
    writeln!(out, "</body>")?;
    write!(out, "</html>")?;
    Ok(())
}

/// Writes the attributes that trace a tag back to its detection.
fn write_identity_attributes(out: &mut String, element: &Element) -> Result<(), Error> {
    if let Some(class_id) = element.class_id() {
        write!(out, " data-id='{class_id}'")?;
    }
    write!(
        out,
        " data-type='{}'",
        escape_attribute(element.class().as_str())
    )?;
    Ok(())
}

fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, true)
}

fn escape_text(value: &str) -> Cow<'_, str> {
    escape(value, false)
}

fn escape(value: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quotes && matches!(c, '\'' | '"'));
    if !value.contains(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' if quotes => escaped.push_str("&#39;"),
            '"' if quotes => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
