//! COD CLI Library
//!
//! Command-line interface for the COD store-level data pipeline.
//!
//! # Overview
//!
//! The CLI wraps the ingestion library behind three commands:
//!
//! - **Ingestion**: run the pipeline over a base directory (`cod run`)
//! - **Inventory**: show processed extracts and store totals (`cod status`)
//! - **Ranking**: query top stores by volume (`cod query`)
//!
//! All commands operate on a base directory holding the conventional
//! layout (`input_files/`, `harmonized_output/`, `archive/`, `reports/`,
//! `cod_store_data.db`), selected with `--base-dir` or `COD_BASE_DIR`.

pub mod commands;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// COD - Store-level offtake data pipeline
#[derive(Parser, Debug)]
#[command(name = "cod")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base directory holding the pipeline layout
    #[arg(long, env = "COD_BASE_DIR", default_value = ".", global = true)]
    pub base_dir: PathBuf,

    /// Print CLI documentation as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the ingestion pipeline once
    ///
    /// Discovers new extracts in the input directory, validates and
    /// harmonizes them, archives the originals, and rebuilds the store.
    Run,

    /// Show the archive inventory and store totals
    Status,

    /// Show top stores by volume for one country and source system
    Query {
        /// Two-letter country code (e.g., "AT")
        #[arg(short, long)]
        country: String,

        /// Three-letter source system code (e.g., "SOF")
        #[arg(short, long)]
        source: String,

        /// Number of stores to show
        #[arg(short, long, default_value = "5")]
        top: usize,

        /// Output format (table, csv, json); defaults to table on a
        /// terminal and csv when piped
        #[arg(short, long)]
        format: Option<String>,

        /// Omit the header row (csv output)
        #[arg(long)]
        no_header: bool,
    },
}
