//! `cod run` command implementation
//!
//! Executes one pipeline run and prints the per-file outcomes plus a
//! summary block.

use crate::error::Result;
use cod_etl::config::PipelineConfig;
use cod_etl::pipeline;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Run the ingestion pipeline once over the base directory
pub async fn run(base_dir: &Path) -> Result<()> {
    let config = PipelineConfig::for_base_dir(base_dir).with_env_overrides();
    info!(base_dir = %base_dir.display(), "Starting pipeline run");

    let summary = pipeline::run(&config).await?;

    if summary.is_noop() {
        println!("No new files to process.");
        return Ok(());
    }

    println!("{}", "Validation Results:".cyan().bold());
    println!();
    for outcome in &summary.outcomes {
        let status = if outcome.is_passed() {
            outcome.status.as_str().green()
        } else {
            outcome.status.as_str().red()
        };

        if outcome.missing_cols == "None" {
            println!("  {}  {} ({} rows)", status, outcome.file, outcome.rows);
        } else {
            println!(
                "  {}  {} ({} rows, missing: {})",
                status, outcome.file, outcome.rows, outcome.missing_cols
            );
        }
    }
    println!();

    println!("{}", "Run Summary:".cyan().bold());
    println!("  Run ID:     {}", summary.run_id);
    println!("  Discovered: {}", summary.discovered);
    println!("  Passed:     {}", summary.passed);
    println!("  Failed:     {}", summary.failed);
    println!("  Archived:   {}", summary.archived);
    if let Some(report) = &summary.report_path {
        println!("  Report:     {}", report.display());
    }
    if let Some(load) = summary.load {
        println!("  Loaded:     {} artifacts ({} rows)", load.artifacts, load.rows);
    }
    println!("  Database:   {}", summary.db_path.display());

    Ok(())
}
