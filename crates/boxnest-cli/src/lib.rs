//! CLI logic for the Boxnest layout tool.
//!
//! This module contains the core CLI logic for the Boxnest layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::info;

use boxnest::{BoxnestError, LayoutBuilder};

/// Run the Boxnest CLI application
///
/// This function reads the annotation batch, rebuilds the element tree,
/// and writes it to the output file in the requested format.
///
/// # Errors
///
/// Returns `BoxnestError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Rejected input in strict mode
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), BoxnestError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = args.format,
        strict = args.strict;
        "Processing annotations"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config).with_strict(args.strict);
    let (elements, _) = builder.parse(&source)?.into_parts();
    let tree = builder.build(elements);
    builder.check(&tree)?;

    let output = match args.format {
        OutputFormat::Html => builder.render_html(&tree)?,
        OutputFormat::Fragment => builder.render_fragment(&tree)?,
        OutputFormat::Outline => builder.render_outline(&tree),
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
