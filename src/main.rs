use clap::Parser;
use filetidy::cli::{CliArgs, run_cli};
use filetidy::output::OutputFormatter;
use std::process;

fn main() {
    let args = CliArgs::parse();

    if let Err(message) = run_cli(&args) {
        OutputFormatter::error(&message);
        process::exit(1);
    }
}
