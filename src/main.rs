//! Main entry point for rowsift
#![allow(clippy::uninlined_format_args)]

use clap::Parser;
use rowsift::logging::init_logging;
use rowsift::{Cli, Config, LogSink, Pipeline, Result as RowsiftResult, RowsiftError};
use std::io::{self, Write};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = main_inner(&cli) {
        println!("Error: {e}");
        std::process::exit(1);
    }
}

fn main_inner(cli: &Cli) -> RowsiftResult<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    let env_warnings = config.apply_env();
    config.apply_cli(cli);

    let sink = init_logging(&config.logging)?;
    for warning in &env_warnings {
        sink.warn(format_args!("{warning}"));
    }

    let result = run(&config, &sink);
    match &result {
        Err(e @ RowsiftError::NotFound { .. }) => sink.error(format_args!("File error: {e}")),
        Err(e) => sink.error(format_args!("Processing error: {e}")),
        Ok(()) => {}
    }
    sink.flush();
    result
}

fn run(config: &Config, sink: &LogSink) -> RowsiftResult<()> {
    let options = config.run_options()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    Pipeline::new(sink.clone()).run(&options, &mut out)?;
    out.flush()?;
    Ok(())
}
