//! Configuration types for Boxnest rendering.
//!
//! This module provides configuration structures that control how a
//! reconstructed tree is rendered. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and document settings.
//! - [`RenderConfig`] - Controls the markup emitted for each element.
//! - [`DocumentConfig`] - Controls the HTML shell wrapped around the markup.
//!
//! # Example
//!
//! ```
//! # use boxnest::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().indent_width(), 2);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Element rendering section.
    #[serde(default)]
    render: RenderConfig,

    /// Document shell section.
    #[serde(default)]
    document: DocumentConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(render: RenderConfig, document: DocumentConfig) -> Self {
        Self { render, document }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the document configuration.
    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }
}

/// Settings for the markup emitted per element.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Spaces of indentation per nesting level.
    indent_width: usize,

    /// Base URL of the placeholder image service; `/{width}/{height}` is appended.
    placeholder_image_base: String,

    /// Dimension used in place of a zero or negative image width or height.
    min_image_dimension: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            placeholder_image_base: "https://picsum.photos".to_string(),
            min_image_dimension: 1,
        }
    }
}

impl RenderConfig {
    /// Returns the indentation width in spaces.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Returns the placeholder image base URL without a trailing slash.
    pub fn placeholder_image_base(&self) -> &str {
        self.placeholder_image_base.trim_end_matches('/')
    }

    /// Returns the fallback image dimension, never less than 1.
    pub fn min_image_dimension(&self) -> u32 {
        self.min_image_dimension.max(1)
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_placeholder_image_base(mut self, base: impl Into<String>) -> Self {
        self.placeholder_image_base = base.into();
        self
    }

    pub fn with_min_image_dimension(mut self, dimension: u32) -> Self {
        self.min_image_dimension = dimension;
        self
    }
}

/// Settings for the HTML shell around the rendered fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Content of the `<title>` element.
    title: String,

    /// Value of the `lang` attribute on `<html>`.
    lang: String,

    /// Script loaded in `<head>` to provide the utility classes, if any.
    stylesheet_script: Option<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Generated Layout".to_string(),
            lang: "en".to_string(),
            stylesheet_script: Some("https://cdn.tailwindcss.com".to_string()),
        }
    }
}

impl DocumentConfig {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Returns the stylesheet script URL, or `None` when disabled.
    pub fn stylesheet_script(&self) -> Option<&str> {
        self.stylesheet_script.as_deref().filter(|src| !src.is_empty())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_stylesheet_script(mut self, src: Option<String>) -> Self {
        self.stylesheet_script = src;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.render().indent_width(), 2);
        assert_eq!(
            config.render().placeholder_image_base(),
            "https://picsum.photos"
        );
        assert_eq!(config.render().min_image_dimension(), 1);
        assert_eq!(config.document().title(), "Generated Layout");
        assert_eq!(config.document().lang(), "en");
        assert_eq!(
            config.document().stylesheet_script(),
            Some("https://cdn.tailwindcss.com")
        );
    }

    #[test]
    fn test_min_image_dimension_never_zero() {
        let render = RenderConfig::default().with_min_image_dimension(0);
        assert_eq!(render.min_image_dimension(), 1);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let render = RenderConfig::default().with_placeholder_image_base("http://img.local/");
        assert_eq!(render.placeholder_image_base(), "http://img.local");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [render]
            indent_width = 4

            [document]
            title = "Checkout"
            "#,
        )
        .unwrap();

        assert_eq!(config.render().indent_width(), 4);
        assert_eq!(config.render().min_image_dimension(), 1);
        assert_eq!(config.document().title(), "Checkout");
        assert_eq!(config.document().lang(), "en");
    }

    #[test]
    fn test_empty_script_disables_it() {
        let document = DocumentConfig::default().with_stylesheet_script(Some(String::new()));
        assert_eq!(document.stylesheet_script(), None);
    }
}
