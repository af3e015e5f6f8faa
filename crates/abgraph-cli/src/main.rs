//! abgraph CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use abgraph_cli::{Args, CliError, error_adapter::to_reportables};

/// Parses `--log-level`; an unknown name falls back to warnings only.
fn init_logging(level: &str) -> LevelFilter {
    let filter = match LevelFilter::from_str(level) {
        Ok(filter) => filter,
        Err(_) => {
            eprintln!("Unknown log level `{level}`, logging warnings only");
            LevelFilter::Warn
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    filter
}

/// Logs one rendered diagnostic per description problem or library error.
fn report_failure(err: &CliError) {
    let handler = GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &reportable) {
            Ok(()) => error!("{rendered}"),
            Err(_) => error!("{reportable}"),
        }
    }
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logging(&args.log_level);
    info!(log_level:?; "abgraph starting");
    debug!(args:?; "Command line");

    match abgraph_cli::run(&args) {
        Ok(()) => info!(output = args.output; "Done"),
        Err(err) => {
            report_failure(&err);
            process::exit(1);
        }
    }
}
