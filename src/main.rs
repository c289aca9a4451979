use clap::Parser;
use rn::cli::{Cli, run_cli};
use rn::output::OutputFormatter;
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(cli, Path::new(".")) {
        OutputFormatter::error(&e.to_string());
        process::exit(1);
    }
}
