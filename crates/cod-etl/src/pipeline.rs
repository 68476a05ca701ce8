//! Pipeline orchestration
//!
//! One `run` drives the full ingestion cycle: ensure the directory layout,
//! rebuild the processed set from the archive, discover new extracts, then
//! per file validate, harmonize, and archive. Runs that discovered at least
//! one file finish by writing the validation report and rebuilding the
//! SQLite store from the complete artifact corpus.
//!
//! Failures are isolated per file: a malformed name, unreadable content, or
//! a failed validation marks that file FAILED in the report and the run
//! moves on. All run state lives in an explicit context threaded through
//! the steps.

use crate::archive::archive_extract;
use crate::config::PipelineConfig;
use crate::discovery::discover_new;
use crate::error::Result;
use crate::extract::Extract;
use crate::harmonize::write_artifact;
use crate::identity::ExtractIdentity;
use crate::report::write_report;
use crate::store::{LoadStats, StoreTable};
use crate::tracker::ProcessedSet;
use crate::validate::ValidationOutcome;
use chrono::{DateTime, SecondsFormat, Utc};
use cod_common::fingerprint::fingerprint_bytes;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Unique id of this run
    pub run_id: Uuid,

    /// Run start instant (also stamps the report file name)
    pub started_at: DateTime<Utc>,

    /// Number of new extracts discovered
    pub discovered: usize,

    /// Extracts that passed validation
    pub passed: usize,

    /// Extracts that failed validation or broke during processing
    pub failed: usize,

    /// Originals moved into the archive
    pub archived: usize,

    /// One report row per attempted extract, in run order
    pub outcomes: Vec<ValidationOutcome>,

    /// Path of the validation report, when one was written
    pub report_path: Option<PathBuf>,

    /// Store rebuild totals, when the loader ran
    pub load: Option<LoadStats>,

    /// Path of the SQLite store database
    pub db_path: PathBuf,
}

impl RunSummary {
    /// Whether the run found nothing to do
    pub fn is_noop(&self) -> bool {
        self.discovered == 0
    }
}

/// Mutable state of one run, threaded explicitly through the steps
struct RunContext<'a> {
    config: &'a PipelineConfig,
    outcomes: Vec<ValidationOutcome>,
    archived: usize,
}

/// Execute one full pipeline run
pub async fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    info!(run_id = %run_id, input = %config.input_dir.display(), "Starting store-level ETL run");

    config.ensure_layout().await?;

    let processed = ProcessedSet::scan(&config.archive_dir).await?;
    debug!(archived = processed.len(), "Processed set rebuilt from archive");

    let candidates = discover_new(&config.input_dir, &processed).await?;
    if candidates.is_empty() {
        info!(run_id = %run_id, "No new files to process");
        return Ok(RunSummary {
            run_id,
            started_at,
            discovered: 0,
            passed: 0,
            failed: 0,
            archived: 0,
            outcomes: Vec::new(),
            report_path: None,
            load: None,
            db_path: config.db_path.clone(),
        });
    }

    info!(run_id = %run_id, count = candidates.len(), "New extracts discovered");

    let mut ctx = RunContext {
        config,
        outcomes: Vec::with_capacity(candidates.len()),
        archived: 0,
    };
    for name in &candidates {
        process_extract(&mut ctx, &processed, name).await;
    }

    let report_path = write_report(&ctx.outcomes, &config.report_dir, started_at).await?;

    let mut store = StoreTable::open(&config.db_path)?;
    let load = store.load_all(&config.output_dir)?;
    info!(
        run_id = %run_id,
        artifacts = load.artifacts,
        rows = load.rows,
        db = %config.db_path.display(),
        "Store rebuilt from harmonized corpus"
    );

    let passed = ctx.outcomes.iter().filter(|o| o.is_passed()).count();
    let failed = ctx.outcomes.len() - passed;

    Ok(RunSummary {
        run_id,
        started_at,
        discovered: candidates.len(),
        passed,
        failed,
        archived: ctx.archived,
        outcomes: ctx.outcomes,
        report_path: Some(report_path),
        load: Some(load),
        db_path: config.db_path.clone(),
    })
}

/// Process one discovered extract, recording exactly one outcome row
async fn process_extract(ctx: &mut RunContext<'_>, processed: &ProcessedSet, file_name: &str) {
    let stem = file_name.strip_suffix(".csv").unwrap_or(file_name);
    info!(file = %file_name, "Processing extract");

    let identity = match ExtractIdentity::parse(file_name) {
        Ok(identity) => identity,
        Err(err) => {
            warn!(file = %file_name, %err, "Extract name rejected, file left in input");
            ctx.outcomes.push(ValidationOutcome::failed(stem, 0));
            return;
        }
    };

    let input_path = ctx.config.input_dir.join(file_name);
    let bytes = match tokio::fs::read(&input_path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(file = %file_name, %err, "Extract unreadable");
            ctx.outcomes.push(ValidationOutcome::failed(stem, 0));
            return;
        }
    };

    let digest = fingerprint_bytes(&bytes);
    debug!(file = %file_name, digest = %digest, "Extract fingerprinted");
    if processed.contains_digest(&digest) {
        info!(file = %file_name, "Content matches an archived extract under a different name");
    }

    let extract = match Extract::from_bytes(&bytes) {
        Ok(extract) => extract,
        Err(err) => {
            warn!(file = %file_name, %err, "Extract is not valid CSV");
            ctx.outcomes.push(ValidationOutcome::failed(stem, 0));
            return;
        }
    };

    let outcome = ValidationOutcome::from_extract(stem, &extract);
    if !outcome.is_passed() {
        warn!(file = %file_name, missing = %outcome.missing_cols, "Validation failed");
        ctx.outcomes.push(outcome);
        return;
    }

    let load_timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let artifact =
        match write_artifact(&ctx.config.output_dir, &extract, &identity, &load_timestamp).await {
            Ok(path) => path,
            Err(err) => {
                error!(file = %file_name, %err, "Harmonization failed");
                ctx.outcomes.push(ValidationOutcome::failed(stem, extract.row_count()));
                return;
            }
        };
    info!(file = %file_name, artifact = %artifact.display(), rows = extract.row_count(), "Harmonized artifact saved");

    // The artifact is already flushed; a failed rename leaves the original
    // in input and the next run re-harmonizes it over the same artifact.
    match archive_extract(&input_path, &ctx.config.archive_dir).await {
        Ok(_) => ctx.archived += 1,
        Err(err) => {
            error!(file = %file_name, %err, "Archive failed, extract remains in input")
        }
    }

    ctx.outcomes.push(outcome);
}
