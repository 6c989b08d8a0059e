//! Thesaurus store backends
//!
//! The gateway talks to a [`ThesaurusStore`]; the concrete backend is chosen
//! from configuration. The store owns its connection and exposes an explicit
//! `connect` / `is_connected` lifecycle.

pub mod rest;
pub mod sqlite;

use async_trait::async_trait;
use chait_common::config::StoreBackend;
use chait_common::ThesaurusRecord;
use thiserror::Error;

pub use rest::RestStore;
pub use sqlite::SqliteStore;

/// Error reported by a store, with provider diagnostics when available
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
    pub code: Option<String>,
    pub hint: Option<String>,
    pub details: Option<String>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            hint: None,
            details: None,
        }
    }

    pub fn not_connected() -> Self {
        Self::new("Store is not connected")
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let code = match &err {
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.to_string()),
            _ => None,
        };
        Self {
            message: err.to_string(),
            code,
            hint: None,
            details: None,
        }
    }
}

impl From<chait_common::Error> for StoreError {
    fn from(err: chait_common::Error) -> Self {
        match err {
            chait_common::Error::Database(db_err) => db_err.into(),
            other => Self::new(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        let code = err.status().map(|s| s.as_u16().to_string());
        Self {
            message: err.to_string(),
            code,
            hint: None,
            details: None,
        }
    }
}

/// Keyed storage for normalized thesaurus records
#[async_trait]
pub trait ThesaurusStore: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Establish (or re-establish) the connection and verify it works
    async fn connect(&mut self) -> Result<(), StoreError>;

    /// `puri` of the stored row, `None` when no row exists
    async fn find_existing(&self, puri: &str) -> Result<Option<String>, StoreError>;

    /// Insert, or overwrite every column of the row with the same `puri`
    async fn upsert(&self, record: &ThesaurusRecord) -> Result<(), StoreError>;
}

#[async_trait]
impl ThesaurusStore for Box<dyn ThesaurusStore> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    async fn connect(&mut self) -> Result<(), StoreError> {
        (**self).connect().await
    }

    async fn find_existing(&self, puri: &str) -> Result<Option<String>, StoreError> {
        (**self).find_existing(puri).await
    }

    async fn upsert(&self, record: &ThesaurusRecord) -> Result<(), StoreError> {
        (**self).upsert(record).await
    }
}

/// Unconnected store for the configured backend
pub fn store_for(backend: &StoreBackend) -> Result<Box<dyn ThesaurusStore>, StoreError> {
    match backend {
        StoreBackend::Sqlite { url } => Ok(Box::new(SqliteStore::new(url.clone()))),
        StoreBackend::Rest { url, key } => Ok(Box::new(RestStore::new(url.clone(), key.clone())?)),
    }
}
