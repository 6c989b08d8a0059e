//! Persistence gateway
//!
//! Normalizes a mapped draft and writes it with upsert-by-`puri` semantics.
//! The existence probe and the upsert each run under the gateway's retry
//! policy. `upsert` never returns `Err`: every failure is folded into a
//! [`PersistResult`] carrying diagnostic context.

use crate::models::{ErrorContext, PersistOperation, PersistResult, ThesaurusDraft};
use crate::store::{StoreError, ThesaurusStore};
use crate::utils::{retry_with_backoff, RetryError, RetryPolicy};
use chait_common::record::{limits, truncate_chars, truncate_optional};
use chait_common::ThesaurusRecord;
use thiserror::Error;

/// Why a persist failed
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Precondition failure; no store call was made
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Failed to initialize database connection: {0}")]
    Connection(StoreError),

    #[error(transparent)]
    Exhausted(#[from] RetryError<StoreError>),
}

impl GatewayError {
    /// Provider diagnostics of the underlying store error, if any
    fn store_error(&self) -> Option<&StoreError> {
        match self {
            GatewayError::MissingFields(_) => None,
            GatewayError::Connection(err) => Some(err),
            GatewayError::Exhausted(err) => Some(&err.last_error),
        }
    }

    fn context(&self, puri: &str) -> ErrorContext {
        let store_error = self.store_error();
        ErrorContext {
            message: self.to_string(),
            code: store_error.and_then(|e| e.code.clone()),
            hint: store_error.and_then(|e| e.hint.clone()),
            details: store_error.and_then(|e| e.details.clone()),
            puri: puri.to_string(),
        }
    }
}

/// Required fields that are absent or empty, in column order
pub fn missing_required_fields(draft: &ThesaurusDraft) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if draft.puri.is_empty() {
        missing.push("puri");
    }
    if draft.provenance.is_empty() {
        missing.push("provenance");
    }
    if draft.identifier.as_deref().map_or(true, str::is_empty) {
        missing.push("identifier");
    }
    missing
}

/// Check required fields and truncate every column to its limit
///
/// Optional columns that are absent or empty become `None`.
pub fn normalize(draft: &ThesaurusDraft) -> Result<ThesaurusRecord, GatewayError> {
    let missing = missing_required_fields(draft);
    let identifier = match draft.identifier.as_deref() {
        Some(identifier) if missing.is_empty() => identifier,
        _ => return Err(GatewayError::MissingFields(missing)),
    };

    let label = |text: &str| truncate_optional(Some(text), limits::LABEL);
    let scope = |text: &str| truncate_optional(Some(text), limits::SCOPE);

    Ok(ThesaurusRecord {
        puri: truncate_chars(&draft.puri, limits::PURI).to_string(),
        provenance: truncate_chars(&draft.provenance, limits::PROVENANCE).to_string(),
        identifier: truncate_chars(identifier, limits::IDENTIFIER).to_string(),
        label_nl: label(&draft.labels.nl),
        label_fr: label(&draft.labels.fr),
        label_en: label(&draft.labels.en),
        scope_nl: scope(&draft.scopes.nl),
        scope_fr: scope(&draft.scopes.fr),
        scope_en: scope(&draft.scopes.en),
        modified_at: draft.modified_at.clone().filter(|m| !m.is_empty()),
        aat: truncate_optional(draft.aat.as_deref(), limits::CROSS_REFERENCE),
        wikidata: truncate_optional(draft.wikidata.as_deref(), limits::CROSS_REFERENCE),
    })
}

/// Owns the store connection and writes records through it
pub struct PersistenceGateway<S> {
    store: S,
    retry: RetryPolicy,
}

impl<S: ThesaurusStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_connected()
    }

    /// Connect the store unless a live connection exists
    pub async fn ensure_connected(&mut self) -> Result<(), StoreError> {
        if self.store.is_connected() {
            return Ok(());
        }
        self.store.connect().await
    }

    /// Normalize and upsert one draft
    pub async fn upsert(&mut self, draft: &ThesaurusDraft) -> PersistResult {
        tracing::debug!(
            puri = %draft.puri,
            identifier = ?draft.identifier,
            provenance = %draft.provenance,
            "Processing record"
        );

        match self.try_upsert(draft).await {
            Ok(operation) => {
                tracing::debug!(puri = %draft.puri, ?operation, "Record persisted");
                PersistResult::succeeded(draft.puri.clone(), operation)
            }
            Err(err) => {
                let context = err.context(&draft.puri);
                tracing::error!(
                    puri = %context.puri,
                    code = ?context.code,
                    hint = ?context.hint,
                    details = ?context.details,
                    "Database operation failed: {}",
                    context.message
                );
                PersistResult::failed(context)
            }
        }
    }

    async fn try_upsert(&mut self, draft: &ThesaurusDraft) -> Result<PersistOperation, GatewayError> {
        let record = normalize(draft)?;

        self.ensure_connected()
            .await
            .map_err(GatewayError::Connection)?;

        let store = &self.store;
        let record = &record;
        let existing =
            retry_with_backoff("Select", self.retry, move || store.find_existing(&record.puri))
                .await?;

        retry_with_backoff("Upsert", self.retry, move || store.upsert(record)).await?;

        Ok(if existing.is_some() {
            PersistOperation::Updated
        } else {
            PersistOperation::Inserted
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use async_trait::async_trait;
    use chait_common::UNAVAILABLE;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that must never be reached
    struct UnreachableStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ThesaurusStore for UnreachableStore {
        fn is_connected(&self) -> bool {
            false
        }

        async fn connect(&mut self) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::new("unreachable"))
        }

        async fn find_existing(&self, _puri: &str) -> Result<Option<String>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::new("unreachable"))
        }

        async fn upsert(&self, _record: &ThesaurusRecord) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::new("unreachable"))
        }
    }

    fn draft() -> ThesaurusDraft {
        let mut draft = ThesaurusDraft::new("MoMU", "http://thesaurus.europeanafashion.eu/idc/1");
        draft.identifier = Some("1".to_string());
        draft
    }

    #[test]
    fn test_missing_required_fields_listed() {
        let mut incomplete = ThesaurusDraft::new("", "");
        incomplete.identifier = Some(String::new());
        assert_eq!(
            missing_required_fields(&incomplete),
            vec!["puri", "provenance", "identifier"]
        );
        assert!(missing_required_fields(&draft()).is_empty());
    }

    #[test]
    fn test_normalize_truncates_and_nulls() {
        let mut draft = draft();
        draft.labels.set(Language::En, "x".repeat(1500));
        draft.labels.set(Language::Fr, String::new());
        draft.scopes.set(Language::Nl, "y".repeat(2500));
        draft.identifier = Some("i".repeat(150));
        draft.aat = Some(format!("http://vocab.getty.edu/aat/{}", "9".repeat(300)));

        let record = normalize(&draft).unwrap();

        assert_eq!(record.label_en.as_ref().map(|l| l.chars().count()), Some(1000));
        assert_eq!(record.label_fr, None);
        assert_eq!(record.label_nl.as_deref(), Some(UNAVAILABLE));
        assert_eq!(record.scope_nl.as_ref().map(|s| s.chars().count()), Some(2000));
        assert_eq!(record.scope_en.as_deref(), Some(UNAVAILABLE));
        assert_eq!(record.identifier.len(), 100);
        assert_eq!(record.aat.as_ref().map(|a| a.len()), Some(255));
        assert_eq!(record.wikidata, None);
        assert_eq!(record.modified_at, None);
    }

    #[tokio::test]
    async fn test_missing_fields_fail_without_store_call() {
        let mut gateway = PersistenceGateway::new(UnreachableStore {
            calls: AtomicUsize::new(0),
        });
        let mut draft = draft();
        draft.identifier = None;

        let result = gateway.upsert(&draft).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Missing required fields: identifier"));
        assert_eq!(gateway.store().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_connection_failure_is_reported() {
        let mut gateway = PersistenceGateway::new(UnreachableStore {
            calls: AtomicUsize::new(0),
        });

        let result = gateway.upsert(&draft()).await;

        assert!(!result.success);
        let message = result.error.unwrap();
        assert!(message.starts_with("Failed to initialize database connection"));
        let details = result.error_details.unwrap();
        assert_eq!(details.puri, "http://thesaurus.europeanafashion.eu/idc/1");
        // connect only, no probe or upsert
        assert_eq!(gateway.store().calls.load(Ordering::SeqCst), 1);
    }
}
