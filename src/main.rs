//! Reposite - serve a repository's static HTML under a base path.

mod cli;
mod config;
mod fileset;
mod logger;
mod prefix;
mod serve;
mod site;
mod source;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        // Diagnostic mode: no config involved
        Commands::Prefix { file, prefix } => cli::prefix::prefix_file(file, prefix),
        Commands::Cat { path, .. } => cli::cat::cat_file(&Config::load(&cli)?, path),
        Commands::Serve { .. } => serve::serve(&Config::load(&cli)?),
    }
}
