//! `todoshare` command-line front end.
//!
//! # Responsibility
//! - Parse arguments, bootstrap logging and storage under the data directory.
//! - Map command failures to a message on stderr and a non-zero exit code.

use clap::Parser;

mod cli;
mod commands;
mod error;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = commands::run(cli) {
        log::error!("event=cli_exit module=cli status=error error={err}");
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}
