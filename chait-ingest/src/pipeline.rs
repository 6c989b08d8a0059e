//! End-to-end ingest run
//!
//! Startup order: connect the store, load the input file, then run the
//! batch. The organization is already validated when options are built.
//! Any failure before the batch is a run-level [`IngestError`].

use crate::error::{IngestError, IngestResult};
use crate::input::load_source_records;
use crate::mapper::MomuMapper;
use crate::models::{BatchResult, RecordError};
use crate::organization::Organization;
use crate::services::{BatchOrchestrator, PersistenceGateway};
use crate::store::{store_for, ThesaurusStore};
use crate::utils::RetryPolicy;
use chait_common::config::StoreConfig;
use std::path::PathBuf;

/// Everything a run needs, already resolved from CLI, env and config file
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub file: PathBuf,
    pub organization: Organization,
    pub store: StoreConfig,
    pub retry: RetryPolicy,
}

/// Run one ingest with the configured store backend
pub async fn run_ingest(options: &IngestOptions) -> IngestResult<BatchResult> {
    let backend = options.store.backend()?;
    let store = store_for(&backend).map_err(IngestError::StoreConnection)?;
    run_ingest_with_store(options, store).await
}

/// Run one ingest against `store`
pub async fn run_ingest_with_store<S: ThesaurusStore>(
    options: &IngestOptions,
    store: S,
) -> IngestResult<BatchResult> {
    let organization = options.organization;

    tracing::info!("Initializing database connection...");
    let mut gateway = PersistenceGateway::new(store).with_retry_policy(options.retry);
    gateway
        .ensure_connected()
        .await
        .map_err(IngestError::StoreConnection)?;

    let records = load_source_records(&options.file)?;
    tracing::info!(
        file = %options.file.display(),
        records = records.len(),
        %organization,
        "Loaded input file"
    );

    let result = match organization {
        Organization::Momu => {
            BatchOrchestrator::new(MomuMapper::new(), gateway)
                .run_batch(&records)
                .await
        }
    };

    Ok(result)
}

/// Log the human-readable summary and every error entry
pub fn log_summary(result: &BatchResult) {
    tracing::info!(
        total = result.total,
        successful = result.successful,
        failed = result.failed,
        skipped = result.skipped,
        "Final summary"
    );

    for entry in &result.errors {
        match entry {
            RecordError::Skipped { index, id, reason } => {
                tracing::warn!(index, id = ?id, "Skipped record: {}", reason);
            }
            RecordError::Failed { index, puri, error } => {
                tracing::warn!(index, puri = ?puri, "Failed record: {}", error);
            }
        }
    }
}
