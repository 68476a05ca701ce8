//! End-to-end tests for the cod query command
//!
//! These tests validate the full query workflow including:
//! - Top-N ranking by volume for a country and source
//! - Output formats (table, json, csv) and header suppression
//! - Format selection when stdout is not a terminal
//! - Error handling before the store exists

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const VALID_AT: &str = "\
Store_ID,Store_Name,City,Volume,Value,Banner
123,Alpha,Vienna,10,20,BigMart
124,Beta,Graz,7,9,SmallMart
";

/// Helper to build a cod invocation rooted at a temp base directory
fn cod(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cod").unwrap();
    cmd.arg("--base-dir").arg(base);
    cmd
}

/// Helper to ingest one Austrian extract so the store exists
fn seed_store(base: &Path) {
    let input_dir = base.join("input_files");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(
        input_dir.join("ATSOF_202401_202401_extract.csv"),
        VALID_AT,
    )
    .unwrap();
    cod(base).arg("run").assert().success();
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_query_without_store_fails() {
    let temp = TempDir::new().unwrap();

    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("AT")
        .arg("--source")
        .arg("SOF")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No store database"))
        .stderr(predicate::str::contains("cod run"));
}

#[tokio::test]
async fn test_query_unknown_format_is_rejected() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("AT")
        .arg("--source")
        .arg("SOF")
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));
}

// ============================================================================
// Output Format Tests
// ============================================================================

#[tokio::test]
async fn test_query_csv_format() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("AT")
        .arg("--source")
        .arg("SOF")
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Store_Name,City,Volume,Value,Unique_Store_ID",
        ))
        .stdout(predicate::str::contains("Alpha,Vienna,10,20,123_BigMart"))
        .stdout(predicate::str::contains("Beta,Graz,7,9,124_SmallMart"));
}

#[tokio::test]
async fn test_query_no_header() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("AT")
        .arg("--source")
        .arg("SOF")
        .arg("--format")
        .arg("csv")
        .arg("--no-header")
        .assert()
        .success()
        .stdout(predicate::str::contains("Store_Name,City").not())
        .stdout(predicate::str::contains("123_BigMart"));
}

#[tokio::test]
async fn test_query_json_format() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("AT")
        .arg("--source")
        .arg("SOF")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Unique_Store_ID\": \"123_BigMart\""))
        .stdout(predicate::str::contains("\"City\": \"Vienna\""));
}

#[tokio::test]
async fn test_query_table_format() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("AT")
        .arg("--source")
        .arg("SOF")
        .arg("--format")
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("│")) // Table borders
        .stdout(predicate::str::contains("Unique_Store_ID"))
        .stdout(predicate::str::contains("123_BigMart"));
}

#[tokio::test]
async fn test_query_defaults_to_csv_when_piped() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    // Captured stdout is a pipe, so the default format is csv
    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("AT")
        .arg("--source")
        .arg("SOF")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Store_Name,City,Volume,Value,Unique_Store_ID",
        ))
        .stdout(predicate::str::contains("│").not());
}

// ============================================================================
// Filtering Tests
// ============================================================================

#[tokio::test]
async fn test_query_top_limits_results() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    // Alpha outsells Beta, so top 1 keeps only Alpha
    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("AT")
        .arg("--source")
        .arg("SOF")
        .arg("--top")
        .arg("1")
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("Beta").not());
}

#[tokio::test]
async fn test_query_empty_match_prints_message() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    cod(temp.path())
        .arg("query")
        .arg("--country")
        .arg("FR")
        .arg("--source")
        .arg("CAR")
        .arg("--format")
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No stores found for country 'FR' and source 'CAR'.",
        ));
}

#[tokio::test]
async fn test_query_short_flags() {
    let temp = TempDir::new().unwrap();
    seed_store(temp.path());

    cod(temp.path())
        .arg("query")
        .arg("-c")
        .arg("AT")
        .arg("-s")
        .arg("SOF")
        .arg("-t")
        .arg("2")
        .arg("-f")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("123_BigMart"));
}
