//! Manuscript - assemble numbered markdown sections into book chapters.

mod cli;
mod config;
mod logger;
mod pipeline;
mod source;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::BookConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = BookConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_book(&config).map(|_| ()),
        Commands::Check { .. } => cli::check::check_sources(&config),
    }
}
