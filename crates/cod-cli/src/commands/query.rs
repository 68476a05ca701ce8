//! `cod query` command implementation
//!
//! Answers "top N stores by volume" questions against the store table,
//! with table, JSON, and CSV output formats.

use crate::error::{CliError, Result};
use cod_etl::config::PipelineConfig;
use cod_etl::store::{StoreTable, TopStore};
use comfy_table::presets::UTF8_FULL;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::Table;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::debug;

const COLUMNS: [&str; 5] = ["Store_Name", "City", "Volume", "Value", "Unique_Store_ID"];

/// Query the store table for the top stores by volume
pub async fn run(
    base_dir: &Path,
    country: &str,
    source: &str,
    top: usize,
    format: Option<&str>,
    no_header: bool,
) -> Result<()> {
    let config = PipelineConfig::for_base_dir(base_dir).with_env_overrides();

    if !config.db_path.exists() {
        return Err(CliError::config(format!(
            "No store database at '{}'. Run 'cod run' first.",
            config.db_path.display()
        )));
    }

    debug!(country, source, top, "Querying store table");
    let store = StoreTable::open(&config.db_path)?;
    let stores = store.top_stores(country, source, top)?;

    let output_format = determine_output_format(format)?;

    if stores.is_empty() && output_format == "table" {
        println!(
            "No stores found for country '{}' and source '{}'.",
            country, source
        );
        return Ok(());
    }

    let rendered = match output_format {
        "table" => format_as_table(&stores),
        "json" => format_as_json(&stores)?,
        "csv" => format_as_csv(&stores, no_header),
        _ => unreachable!(),
    };
    print!("{}", rendered);

    Ok(())
}

/// Pick the output format: explicit flag wins, otherwise table for
/// terminals and CSV for pipes
fn determine_output_format(format: Option<&str>) -> Result<&'static str> {
    match format {
        Some("table") => Ok("table"),
        Some("json") => Ok("json"),
        Some("csv") => Ok("csv"),
        Some(other) => Err(CliError::config(format!(
            "Unknown format: '{}'. Use table, json, or csv",
            other
        ))),
        None => {
            if io::stdout().is_terminal() {
                Ok("table")
            } else {
                Ok("csv")
            }
        }
    }
}

fn format_as_table(stores: &[TopStore]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(COLUMNS);

    for store in stores {
        table.add_row(vec![
            store.store_name.clone(),
            store.city.clone(),
            format_number(store.volume),
            format_number(store.value),
            store.unique_store_id.clone(),
        ]);
    }

    format!("{}\n", table)
}

fn format_as_json(stores: &[TopStore]) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(stores)?;
    rendered.push('\n');
    Ok(rendered)
}

fn format_as_csv(stores: &[TopStore], no_header: bool) -> String {
    let mut rendered = String::new();

    if !no_header {
        rendered.push_str(&COLUMNS.join(","));
        rendered.push('\n');
    }

    for store in stores {
        let row = [
            csv_escape(&store.store_name),
            csv_escape(&store.city),
            format_number(store.volume),
            format_number(store.value),
            csv_escape(&store.unique_store_id),
        ];
        rendered.push_str(&row.join(","));
        rendered.push('\n');
    }

    rendered
}

fn format_number(n: Option<f64>) -> String {
    match n {
        Some(n) => n.to_string(),
        None => "NULL".to_string(),
    }
}

/// Quote a CSV field when it contains commas, quotes, or newlines
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
