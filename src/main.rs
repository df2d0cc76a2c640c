use std::error::Error as _;
use std::{io, process};

use buildstrap::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose();
    init_tracing(verbose);

    if let Err(err) = cli.execute() {
        eprintln!("Fatal error: {err}");

        if verbose > 0 {
            eprintln!("-----------------------------------");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("caused by: {cause}");
                source = cause.source();
            }
            eprintln!("{err:#?}");
        }

        process::exit(1);
    }
}

/// `BUILDSTRAP_LOG` wins over `-v`, which maps to warn, info, debug and trace.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("BUILDSTRAP_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("buildstrap={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
