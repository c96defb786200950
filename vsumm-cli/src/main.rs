// vsumm-cli/src/main.rs
//
// Entry point for the vsumm command-line tool.
//
// Responsibilities include:
// - Parsing command-line arguments with clap.
// - Installing the env_logger backend for vsumm-core's log output.
// - Dispatching to the summarize, segments or kernel command.
// - Reporting errors and setting the process exit code.

use clap::Parser;
use std::process;
use vsumm_cli::error::{EXIT_FAILURE, report_error};
use vsumm_cli::{Cli, Commands, logging, run_kernel, run_segments, run_summarize};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Summarize(args) => run_summarize(args),
        Commands::Segments(args) => run_segments(args),
        Commands::Kernel(args) => run_kernel(args),
    };

    if let Err(err) = result {
        log::debug!("Command failed: {:?}", err);
        report_error(&err);
        process::exit(EXIT_FAILURE);
    }
}
