//! Command-line entry point: annotation JSON in, markup out.

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use boxnest::BoxnestError;
use boxnest_cli::{Args, error_adapter};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match boxnest_cli::run(&args) {
        Ok(()) => {
            info!(output = args.output; "Layout written");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level {level:?}, falling back to 'warn'");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
}

/// Log one rendered miette report per problem found in `err`.
fn report(err: &BoxnestError) {
    let handler = miette::GraphicalReportHandler::new();

    for report in error_adapter::reports(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &report) {
            Ok(()) => error!("{rendered}"),
            Err(_) => error!("{report}"),
        }
    }
}
