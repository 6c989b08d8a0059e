//! chait-ingest library - thesaurus ingest pipeline
//!
//! Reads JSON-LD thesaurus exports from museum data providers, maps them to
//! normalized thesaurus records and upserts them into the store keyed by
//! persistent URI (`puri`).
//!
//! Flow per record: [`source::SourceRecord`] → [`mapper::RecordMapper`] →
//! [`services::PersistenceGateway`] → [`store::ThesaurusStore`], driven by
//! [`services::BatchOrchestrator`].

pub mod error;
pub mod input;
pub mod mapper;
pub mod models;
pub mod organization;
pub mod pipeline;
pub mod sanitize;
pub mod services;
pub mod source;
pub mod store;
pub mod utils;

pub use error::{IngestError, IngestResult};
pub use pipeline::{log_summary, run_ingest, run_ingest_with_store, IngestOptions};
