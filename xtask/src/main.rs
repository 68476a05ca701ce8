//! Build automation tasks for COD
//!
//! This tool provides various automation tasks for the COD project, including:
//! - Generating CLI documentation from source code
//! - Future build-related tasks

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for COD", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate CLI documentation in markdown format
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    // Generate markdown from clap definitions
    let markdown = clap_markdown::help_markdown::<cod_cli::Cli>();

    let doc_content = format!(
        r#"---
title: CLI Reference
description: Complete command reference for the COD CLI
---

# COD CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {}.

## Overview

COD (Customer Offtake Data) is a command-line tool for ingesting store-level
offtake extracts into a harmonized SQLite store.

## Installation

### From Source

```bash
cargo install --path crates/cod-cli
```

## Quick Start

```bash
# Ingest new extracts from input_files/
cod run

# See what has been processed so far
cod status

# Rank stores by volume for one country and source
cod query --country AT --source SOF --top 10
```

## Commands

{}

## Environment Variables

- `COD_BASE_DIR` - Base directory holding the pipeline layout (default: `.`)
- `COD_INPUT_DIR` - Override the raw extract directory
- `COD_OUTPUT_DIR` - Override the harmonized artifact directory
- `COD_ARCHIVE_DIR` - Override the processed-extract archive
- `COD_REPORT_DIR` - Override the validation report directory
- `COD_DB_PATH` - Override the SQLite store path
- `LOG_LEVEL` - Logging level (e.g., `debug`, `info`, `warn`, `error`)

## Directory Layout

All commands operate on a base directory with the conventional layout:

```text
input_files/         raw extracts, named <CC><SRC>_<YYYYMM>_<YYYYMM>_<label>.csv
harmonized_output/   canonical CDM_*.csv artifacts
archive/             originals of processed extracts
reports/             per-run validation reports
cod_store_data.db    SQLite store rebuilt on every run
```

---

*This documentation is automatically generated from the CLI source code. To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    // Create output directory if it doesn't exist
    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    // Write the markdown file
    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, doc_content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Review the generated documentation");
    println!("  2. Commit it to version control");
    println!("  3. Add a CI check to ensure docs stay in sync");

    Ok(())
}
