//! Strata CLI library
//!
//! Core logic of the `strata` binary: load configuration, read a model
//! document, lay it out and write the layout as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use strata::{LayoutBuilder, StrataError};

/// Run the Strata CLI application
///
/// Reads the model at `args.input`, lays it out and writes the JSON layout
/// document to `args.output`.
///
/// # Errors
///
/// Returns `StrataError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Model document errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), StrataError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing model"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(direction) = &args.direction {
        // Parsed at layout time; an unknown value is logged and skipped.
        app_config = app_config.with_direction(Some(direction.clone()));
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let model = builder.parse(&source)?;
    let json = builder.render_json(&model)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
