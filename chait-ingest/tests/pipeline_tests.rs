//! End-to-end ingest tests against an on-disk SQLite store
//!
//! Input file → mapper → gateway → THESAURI table, plus the run-level
//! failures that stop a run before any record is processed.

mod helpers;

use chait_common::config::StoreConfig;
use chait_common::UNAVAILABLE;
use chait_ingest::models::RecordError;
use chait_ingest::organization::Organization;
use chait_ingest::store::{SqliteStore, ThesaurusStore};
use chait_ingest::utils::RetryPolicy;
use chait_ingest::{run_ingest, run_ingest_with_store, IngestError, IngestOptions};
use helpers::{concept, concept_uri, write_input, MemoryStore, EXACT_MATCH, IDENTIFIER, PREF_LABEL, SCOPE_NOTE};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

fn sqlite_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("thesauri.db").display())
}

fn options(file: &Path, url: &str) -> IngestOptions {
    IngestOptions {
        file: file.to_path_buf(),
        organization: Organization::Momu,
        store: StoreConfig {
            url: url.to_string(),
            key: None,
        },
        retry: RetryPolicy::new(3, Duration::from_millis(1)),
    }
}

async fn open_store(url: &str) -> SqliteStore {
    let mut store = SqliteStore::new(url);
    store.connect().await.expect("Failed to open store");
    store
}

#[tokio::test]
async fn test_single_record_end_to_end() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    let input = write_input(&json!([{
        "@id": "http://thesaurus.europeanafashion.eu/idc/123",
        "http://purl.org/dc/terms/identifier": [{"@value": "123"}],
        "http://www.w3.org/2004/02/skos/core#prefLabel": [{"@language": "en", "@value": "Coat"}]
    }]));

    let result = run_ingest(&options(input.path(), &url)).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.successful, 1);
    assert_eq!(result.failed, 0);
    assert_eq!(result.skipped, 0);
    assert!(result.errors.is_empty());

    let store = open_store(&url).await;
    let record = store
        .load("http://thesaurus.europeanafashion.eu/idc/123")
        .await
        .unwrap()
        .expect("record not stored");
    assert_eq!(record.identifier, "123");
    assert_eq!(record.provenance, "MoMU");
    assert_eq!(record.label_en.as_deref(), Some("Coat"));
    assert_eq!(record.label_nl.as_deref(), Some(UNAVAILABLE));
    assert_eq!(record.label_fr.as_deref(), Some(UNAVAILABLE));
    assert_eq!(record.scope_en.as_deref(), Some(UNAVAILABLE));
    assert_eq!(record.aat, None);
}

#[tokio::test]
async fn test_full_record_fields_persisted() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    let input = write_input(&json!([{
        "@id": concept_uri(7),
        IDENTIFIER: [{"@value": "7"}],
        "http://purl.org/dc/terms/modified": [{"@value": "2020-01-02T03:04:05Z"}],
        PREF_LABEL: [
            {"@language": "nl", "@value": "Jas"},
            {"@language": "fr", "@value": "<i>Manteau</i>"},
            {"@language": "en", "@value": "Coat"}
        ],
        SCOPE_NOTE: [{"@language": "en", "@value": "<p>Outer garment</p>"}],
        EXACT_MATCH: [
            {"@id": "http://vocab.getty.edu/aat/300046143"},
            {"@id": "http://www.wikidata.org/entity/Q11460"}
        ]
    }]));

    let result = run_ingest(&options(input.path(), &url)).await.unwrap();
    assert_eq!(result.successful, 1);

    let record = open_store(&url).await.load(&concept_uri(7)).await.unwrap().unwrap();
    assert_eq!(record.label_nl.as_deref(), Some("Jas"));
    assert_eq!(record.label_fr.as_deref(), Some("Manteau"));
    assert_eq!(record.scope_en.as_deref(), Some("Outer garment"));
    assert_eq!(record.scope_nl.as_deref(), Some(UNAVAILABLE));
    assert_eq!(record.modified_at.as_deref(), Some("2020-01-02T03:04:05Z"));
    assert_eq!(record.aat.as_deref(), Some("http://vocab.getty.edu/aat/300046143"));
    assert_eq!(record.wikidata.as_deref(), Some("http://www.wikidata.org/entity/Q11460"));
}

#[tokio::test]
async fn test_one_malformed_record_in_batch() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    let input = write_input(&json!([
        concept(0, "Coat"),
        concept(1, "Dress"),
        {"@id": "http://example.org/not-a-concept"},
        concept(3, "Hat"),
        concept(4, "Shoe")
    ]));

    let result = run_ingest(&options(input.path(), &url)).await.unwrap();

    assert_eq!(result.total, 5);
    assert_eq!(result.successful, 4);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.failed, 0);
    assert_eq!(
        result.errors,
        vec![RecordError::Skipped {
            index: 2,
            id: Some("http://example.org/not-a-concept".to_string()),
            reason: "Invalid URI format".to_string(),
        }]
    );

    assert_eq!(open_store(&url).await.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_rerun_does_not_duplicate() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    let input = write_input(&json!([concept(1, "Coat"), concept(2, "Dress")]));

    let first = run_ingest(&options(input.path(), &url)).await.unwrap();
    let second = run_ingest(&options(input.path(), &url)).await.unwrap();

    assert_eq!(first.successful, 2);
    assert_eq!(second.successful, 2);
    assert_eq!(open_store(&url).await.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_progress_batch_of_many_records() {
    let records: Vec<_> = (0..25).map(|n| concept(n, "Coat")).collect();
    let input = write_input(&json!(records));

    let result = run_ingest_with_store(&options(input.path(), "unused"), MemoryStore::new())
        .await
        .unwrap();

    assert_eq!(result.total, 25);
    assert_eq!(result.successful, 25);
}

#[tokio::test]
async fn test_missing_file_fails_run() {
    let dir = TempDir::new().unwrap();
    let missing = PathBuf::from("/nonexistent/chait/input.json");

    let err = run_ingest(&options(&missing, &sqlite_url(&dir)))
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::FileNotFound(_)));
}

#[tokio::test]
async fn test_unsupported_store_url_fails_run() {
    let input = write_input(&json!([]));

    let err = run_ingest(&options(input.path(), "ftp://example.org"))
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Common(_)));
}
