//! Batch run summary

use serde::{Deserialize, Serialize};

/// One skipped or failed input record, by position in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordError {
    /// Record rejected by validation; never retried
    Skipped {
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        reason: String,
    },
    /// Record that could not be mapped or persisted
    Failed {
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        puri: Option<String>,
        error: String,
    },
}

impl RecordError {
    pub fn index(&self) -> usize {
        match self {
            RecordError::Skipped { index, .. } | RecordError::Failed { index, .. } => *index,
        }
    }
}

/// Counts and error detail for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<RecordError>,
}

impl BatchResult {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_skip(&mut self, index: usize, id: Option<String>, reason: impl Into<String>) {
        self.skipped += 1;
        self.errors.push(RecordError::Skipped {
            index,
            id,
            reason: reason.into(),
        });
    }

    pub fn record_failure(&mut self, index: usize, puri: Option<String>, error: impl Into<String>) {
        self.failed += 1;
        self.errors.push(RecordError::Failed {
            index,
            puri,
            error: error.into(),
        });
    }

    /// Records accounted for so far
    pub fn processed(&self) -> usize {
        self.successful + self.failed + self.skipped
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
