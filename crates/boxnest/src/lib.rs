//! Boxnest - Rebuilds page layouts from detected UI element boxes.
//!
//! An upstream detector reports labeled, axis-aligned boxes for the elements
//! on a screenshot. Boxnest nests them into a containment tree, infers whether
//! each group of siblings runs as a row or a column, and renders the result as
//! HTML with utility classes.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use boxnest_core::{element, geometry};
pub use boxnest_parser::ParsedBatch;

pub use error::BoxnestError;

use log::{debug, info, trace, warn};

use config::AppConfig;
use element::Element;
use export::{Exporter, html::HtmlExporterBuilder};
use structure::ElementTree;

/// Builder for parsing annotations and rendering layouts.
///
/// # Examples
///
/// ```rust
/// use boxnest::{LayoutBuilder, config::AppConfig};
///
/// let source = r#"{"annotations": [
///     {"class": "header", "class_id": 5, "bbox": [0, 0, 100, 20]},
///     {"class": "button", "class_id": 0, "bbox": [10, 5, 40, 15]}
/// ]}"#;
///
/// let builder = LayoutBuilder::new(AppConfig::default());
///
/// let batch = builder.parse(source).expect("Failed to parse");
/// let tree = builder.build(batch.elements().to_vec());
///
/// let html = builder.render_fragment(&tree).expect("Failed to render");
/// assert!(html.starts_with("<header"));
/// ```
#[derive(Default)]
pub struct LayoutBuilder {
    config: AppConfig,
    strict: bool,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use boxnest::{LayoutBuilder, config::AppConfig};
    ///
    /// let builder = LayoutBuilder::new(AppConfig::default());
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Treat lossy input as an error.
    ///
    /// In strict mode [`parse`](Self::parse) fails on any skipped entry and
    /// [`check`](Self::check) fails on rejected boxes or an empty tree.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse an annotation batch.
    ///
    /// # Errors
    ///
    /// Returns `BoxnestError::Parse` when the source is not a valid batch,
    /// or, in strict mode, when any entry had to be skipped.
    pub fn parse(&self, source: &str) -> Result<ParsedBatch, BoxnestError> {
        info!("Parsing annotations");

        let batch = boxnest_parser::parse(source)
            .map_err(|err| BoxnestError::new_parse_error(err, source))?;

        if !batch.warnings().is_empty() {
            warn!(skipped = batch.warnings().len(); "Some annotations were skipped");
            if self.strict {
                let (_, warnings) = batch.into_parts();
                let err = boxnest_parser::error::ParseError::from_warnings(warnings);
                return Err(BoxnestError::new_parse_error(err, source));
            }
        }

        debug!(elements = batch.elements().len(); "Annotations parsed successfully");
        Ok(batch)
    }

    /// Nest elements into a containment tree.
    ///
    /// Elements with invalid boxes are left out and listed in
    /// [`ElementTree::rejections`].
    pub fn build(&self, elements: Vec<Element>) -> ElementTree {
        info!(elements = elements.len(); "Building element tree");
        let tree = ElementTree::build(elements);
        trace!(outline:% = tree.outline(); "Built element tree");
        tree
    }

    /// Verify that a built tree lost nothing.
    ///
    /// Always succeeds unless the builder is strict.
    ///
    /// # Errors
    ///
    /// Returns `BoxnestError::Rejected` in strict mode when any element was
    /// rejected or the tree has no elements.
    pub fn check(&self, tree: &ElementTree) -> Result<(), BoxnestError> {
        if !self.strict {
            return Ok(());
        }

        if let Some(rejection) = tree.rejections().first() {
            return Err(BoxnestError::Rejected(format!(
                "{rejection} ({} rejected in total)",
                tree.rejections().len()
            )));
        }
        if tree.is_empty() {
            return Err(BoxnestError::Rejected(
                "batch has no usable elements".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the tree as a bare markup fragment.
    ///
    /// # Errors
    ///
    /// Returns `BoxnestError::Export` if rendering fails.
    pub fn render_fragment(&self, tree: &ElementTree) -> Result<String, BoxnestError> {
        let exporter = HtmlExporterBuilder::new()
            .with_render_config(self.config.render())
            .build();
        let fragment = exporter.export_tree(tree)?;
        info!(bytes = fragment.len(); "Fragment rendered successfully");
        Ok(fragment)
    }

    /// Render the tree as a complete HTML document.
    ///
    /// # Errors
    ///
    /// Returns `BoxnestError::Export` if rendering fails.
    pub fn render_html(&self, tree: &ElementTree) -> Result<String, BoxnestError> {
        let exporter = HtmlExporterBuilder::new()
            .with_render_config(self.config.render())
            .with_document(self.config.document())
            .build();
        let html = exporter.export_tree(tree)?;
        info!(bytes = html.len(); "HTML rendered successfully");
        Ok(html)
    }

    /// Render the tree as an indented outline, one node per line.
    pub fn render_outline(&self, tree: &ElementTree) -> String {
        tree.outline()
    }
}
