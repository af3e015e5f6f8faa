//! CLI logic for the abgraph layering tool.
//!
//! Reads an antibody description, builds the layered graph, runs the reference
//! grid layout and writes a plain-text report of layers, swimlanes and
//! positions.

pub mod description;
pub mod error_adapter;
pub mod report;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::CliError;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use abgraph::LayeredGraphBuilder;

/// Run the abgraph CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns [`CliError`] for:
/// - File I/O errors
/// - Configuration loading errors
/// - Description errors
/// - Invalid antibody models
/// - Layout errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing antibody description"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let antibody = description::parse_description(&source)
        .map_err(|err| CliError::new_description_error(err, source.as_str()))?;

    let builder = LayeredGraphBuilder::new(app_config);
    let mut graph = builder.build_layered_graph(&antibody)?;
    let geometry = builder.layout(&mut graph);

    let mut out = Vec::new();
    report::write_report(&mut out, &graph, &geometry)?;
    if args.output == "-" {
        io::stdout().lock().write_all(&out)?;
    } else {
        fs::write(&args.output, out)?;
    }

    info!(output_file = args.output, nodes = graph.node_count(); "Layer report written");

    Ok(())
}
