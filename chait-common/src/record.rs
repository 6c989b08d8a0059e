//! Normalized thesaurus record
//!
//! One row of the `THESAURI` table. Field names serialize to the column
//! names used by every store backend (`label_NL`, `AAT`, ...), so the same
//! value can be bound into SQL or posted as a JSON row.

use serde::{Deserialize, Serialize};

/// Table holding normalized thesaurus concepts
pub const THESAURI_TABLE: &str = "THESAURI";

/// Placeholder for a language the source supplied no text for at all
pub const UNAVAILABLE: &str = "UNAVAILABLE";

/// Column names in declaration order
pub const COLUMNS: [&str; 12] = [
    "puri",
    "provenance",
    "identifier",
    "label_NL",
    "label_FR",
    "label_EN",
    "scope_NL",
    "scope_FR",
    "scope_EN",
    "modified_at",
    "AAT",
    "Wikidata",
];

/// Maximum column lengths, counted in characters
pub mod limits {
    pub const PURI: usize = 255;
    pub const PROVENANCE: usize = 50;
    pub const IDENTIFIER: usize = 100;
    pub const LABEL: usize = 1000;
    pub const SCOPE: usize = 2000;
    pub const CROSS_REFERENCE: usize = 255;
}

/// Thesaurus concept as persisted; `puri` is the conflict key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ThesaurusRecord {
    pub puri: String,
    pub provenance: String,
    pub identifier: String,
    #[serde(rename = "label_NL")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "label_NL"))]
    pub label_nl: Option<String>,
    #[serde(rename = "label_FR")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "label_FR"))]
    pub label_fr: Option<String>,
    #[serde(rename = "label_EN")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "label_EN"))]
    pub label_en: Option<String>,
    #[serde(rename = "scope_NL")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "scope_NL"))]
    pub scope_nl: Option<String>,
    #[serde(rename = "scope_FR")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "scope_FR"))]
    pub scope_fr: Option<String>,
    #[serde(rename = "scope_EN")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "scope_EN"))]
    pub scope_en: Option<String>,
    pub modified_at: Option<String>,
    #[serde(rename = "AAT")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "AAT"))]
    pub aat: Option<String>,
    #[serde(rename = "Wikidata")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Wikidata"))]
    pub wikidata: Option<String>,
}

/// Cut `value` down to at most `max` characters without splitting a char
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((byte_index, _)) => &value[..byte_index],
        None => value,
    }
}

/// Truncate an optional column, mapping empty text to `None`
pub fn truncate_optional(value: Option<&str>, max: usize) -> Option<String> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| truncate_chars(v, max).to_string())
}
