//! Data models for the ingest pipeline

pub mod batch_result;
pub mod draft;
pub mod persist_result;

pub use batch_result::{BatchResult, RecordError};
pub use draft::{Language, LanguageSlots, ThesaurusDraft};
pub use persist_result::{ErrorContext, PersistOperation, PersistResult};
