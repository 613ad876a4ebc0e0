//! bdd-fixtures - inspect and convert golden fixture files
//!
//! Fixture files map context titles to lists of `{input, golden}` records.
//! This tool shows where a test's fixtures live, checks that a file
//! decodes, reads single values and converts between JSON and YAML.

use bdd::common::logging;
use bdd::{cli, commands};
use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "bdd-fixtures", about = "Golden fixture file tool")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
