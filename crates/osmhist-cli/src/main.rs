//! osmhist CLI - Command-line interface
//!
//! Resolves land-use raster extents and downloads OSM history for them.

mod cli;
mod commands;
mod config_loader;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute the command; logging is set up once the config is known
    commands::execute(cli)
}
