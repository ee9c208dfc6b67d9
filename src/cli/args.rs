//! Command-line interface definitions.

use crate::config::{ChapterOrder, MismatchPolicy};
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Assemble numbered markdown sections into per-chapter book manuscripts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Source directory with numbered .md files (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Output root for chapter files and manifest (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: manuscript.toml)
    #[arg(short = 'C', long, default_value = "manuscript.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert sources into chapter files and a Book.txt manifest
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// List source files with their parsed chapter numbers
    #[command(visible_alias = "c")]
    Check {
        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Run the whole conversion without writing any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Chapter ordering in the manifest
    #[arg(long, value_enum)]
    pub order: Option<ChapterOrder>,

    /// How to handle .md files that don't follow the naming scheme
    #[arg(long, value_enum)]
    pub on_mismatch: Option<MismatchPolicy>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
