//! Batch orchestrator
//!
//! Runs mapper and gateway over an input collection strictly one record at
//! a time, in input order. No per-record problem stops the batch: skips and
//! failures are counted and listed in the returned [`BatchResult`].

use super::persistence_gateway::PersistenceGateway;
use crate::mapper::{MappedOutcome, RecordMapper};
use crate::models::BatchResult;
use crate::source::SourceRecord;
use crate::store::ThesaurusStore;
use futures::FutureExt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Records between progress log lines
pub const PROGRESS_INTERVAL: usize = 10;

pub struct BatchOrchestrator<M, S> {
    mapper: M,
    gateway: PersistenceGateway<S>,
}

impl<M: RecordMapper, S: ThesaurusStore> BatchOrchestrator<M, S> {
    pub fn new(mapper: M, gateway: PersistenceGateway<S>) -> Self {
        Self { mapper, gateway }
    }

    /// Map and persist every record, returning the final counts
    pub async fn run_batch(&mut self, records: &[SourceRecord]) -> BatchResult {
        let total = records.len();
        let mut result = BatchResult::new(total);

        tracing::info!(
            total,
            provenance = self.mapper.provenance(),
            "Starting batch"
        );

        for (index, record) in records.iter().enumerate() {
            self.process_record(index, record, &mut result).await;

            if (index + 1) % PROGRESS_INTERVAL == 0 {
                tracing::info!("Processed {}/{} records...", index + 1, total);
            }
        }

        result
    }

    async fn process_record(&mut self, index: usize, record: &SourceRecord, result: &mut BatchResult) {
        let mapper = &self.mapper;
        let outcome = match catch_unwind(AssertUnwindSafe(|| mapper.map(record))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                tracing::warn!(index, error = %err, "Record could not be mapped");
                result.record_failure(index, None, err.to_string());
                return;
            }
            Err(panic_payload) => {
                let message = panic_message(panic_payload.as_ref());
                tracing::error!(index, "Mapper panicked: {}", message);
                result.record_failure(index, None, message);
                return;
            }
        };

        match outcome {
            MappedOutcome::Skipped { reason, id } => {
                tracing::debug!(index, id = ?id, %reason, "Record skipped");
                result.record_skip(index, id, reason.to_string());
            }
            MappedOutcome::Mapped(draft) => {
                let persisted = match AssertUnwindSafe(self.gateway.upsert(&draft))
                    .catch_unwind()
                    .await
                {
                    Ok(persisted) => persisted,
                    Err(panic_payload) => {
                        let message = panic_message(panic_payload.as_ref());
                        tracing::error!(index, puri = %draft.puri, "Store panicked: {}", message);
                        result.record_failure(index, Some(draft.puri.clone()), message);
                        return;
                    }
                };
                if persisted.success {
                    result.record_success();
                } else {
                    result.record_failure(
                        index,
                        Some(persisted.puri),
                        persisted
                            .error
                            .unwrap_or_else(|| "Unknown error".to_string()),
                    );
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
