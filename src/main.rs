//! CLI entry point for the unique separation peg search

use clap::Parser;
use pegboard::io::cli::{Cli, SearchRunner};

fn main() -> pegboard::Result<()> {
    let cli = Cli::parse();
    let runner = SearchRunner::new(cli);
    runner.run()
}
