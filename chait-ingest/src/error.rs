//! Error types for chait-ingest
//!
//! These are run-level errors: they stop the whole ingest before or instead
//! of processing records. Per-record problems never surface here; they are
//! reported in the batch result.

use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in input file {}: {source}", .path.display())]
    ParseInput {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid input file {}: expected a JSON array of records", .0.display())]
    NotAnArray(PathBuf),

    #[error("Invalid organization. Must be one of: {0}")]
    InvalidOrganization(String),

    #[error("Failed to initialize database connection: {0}")]
    StoreConnection(#[source] StoreError),

    /// Configuration or other chait-common error
    #[error(transparent)]
    Common(#[from] chait_common::Error),
}

/// Result type for run-level operations
pub type IngestResult<T> = Result<T, IngestError>;
