//! Test Helper Utilities
//!
//! Shared utilities for testing chait-ingest

#![allow(dead_code)]

pub mod stores;

pub use stores::{FlakyStore, MemoryStore};

use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const SCOPE_NOTE: &str = "http://www.w3.org/2004/02/skos/core#scopeNote";
pub const EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";

pub fn concept_uri(n: usize) -> String {
    format!("http://thesaurus.europeanafashion.eu/idc/{}", n)
}

/// Valid MoMU concept with an English label
pub fn concept(n: usize, label_en: &str) -> Value {
    json!({
        "@id": concept_uri(n),
        IDENTIFIER: [{"@value": n.to_string()}],
        PREF_LABEL: [{"@language": "en", "@value": label_en}]
    })
}

/// Write records to a temporary input file
pub fn write_input(records: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create input file");
    file.write_all(records.to_string().as_bytes())
        .expect("Failed to write input file");
    file
}
