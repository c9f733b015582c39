use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod change_cmd;
mod cli;

use cli::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    change_cmd::run_change(cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
