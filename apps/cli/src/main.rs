//! skillsync CLI: README skill-structure synchronizer.
//!
//! Rebuilds the `## Skill Structure` tree in `README.md` from the reference
//! files on disk whenever git reports changes to the references directory.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
