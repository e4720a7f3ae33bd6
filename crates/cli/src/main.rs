use std::process::ExitCode;

use clap::Parser;
use groupthink_cli::cli_args::Args;

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    groupthink_cli::run(&args)
}
