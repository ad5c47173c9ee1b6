//! `blood`: a command-line front end for the plain-text donor registry.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
