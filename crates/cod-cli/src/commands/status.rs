//! `cod status` command implementation
//!
//! Reports what the pipeline has processed so far without mutating
//! anything: archived extracts, canonical artifacts, and store rows.

use crate::error::Result;
use cod_etl::config::PipelineConfig;
use cod_etl::store::StoreTable;
use cod_etl::tracker::ProcessedSet;
use colored::Colorize;
use std::path::Path;

/// Show the processed-extract ledger and store totals
pub async fn run(base_dir: &Path) -> Result<()> {
    let config = PipelineConfig::for_base_dir(base_dir).with_env_overrides();

    let processed = if config.archive_dir.is_dir() {
        ProcessedSet::scan(&config.archive_dir).await?
    } else {
        ProcessedSet::default()
    };

    if processed.is_empty() {
        println!("No processed extracts found.");
        println!("Run 'cod run' to ingest files from the input directory.");
        return Ok(());
    }

    println!("{}", "Processed Extracts:".cyan().bold());
    println!();
    for (name, digest) in processed.iter() {
        println!("  {}  {}", &digest[..16], name.green());
    }
    println!();

    let artifacts = count_artifacts(&config).await?;
    let store_rows = count_store_rows(&config)?;

    println!("{}", "Summary:".cyan().bold());
    println!("  Processed extracts:  {}", processed.len());
    println!("  Canonical artifacts: {}", artifacts);
    println!("  Store rows:          {}", store_rows);
    println!("  Database:            {}", config.db_path.display());

    Ok(())
}

async fn count_artifacts(config: &PipelineConfig) -> Result<usize> {
    if !config.output_dir.is_dir() {
        return Ok(0);
    }

    let mut count = 0;
    let mut entries = tokio::fs::read_dir(&config.output_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with("CDM_") && name.ends_with(".csv") {
            count += 1;
        }
    }
    Ok(count)
}

fn count_store_rows(config: &PipelineConfig) -> Result<i64> {
    if !config.db_path.exists() {
        return Ok(0);
    }

    let store = StoreTable::open(&config.db_path)?;
    if store.has_table()? {
        Ok(store.count_rows()?)
    } else {
        Ok(0)
    }
}
