//! Record mappers
//!
//! A mapper turns one provider record into a [`ThesaurusDraft`], or explains
//! why the record was skipped. Skips are validation outcomes; a [`MapError`]
//! means the record could not be read at all and is counted as a failure.

pub mod momu;

use crate::models::{Language, LanguageSlots, ThesaurusDraft};
use crate::sanitize::strip_markup;
use crate::source::{SourceError, SourceRecord, TaggedLiteral};
use std::fmt;
use thiserror::Error;

pub use momu::MomuMapper;

/// Why a record was not mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingId,
    InvalidUri,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingId => f.write_str("Missing @id field"),
            SkipReason::InvalidUri => f.write_str("Invalid URI format"),
        }
    }
}

/// Result of mapping one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedOutcome {
    /// Record rejected; `id` carries the raw identity when there was one
    Skipped {
        reason: SkipReason,
        id: Option<String>,
    },
    Mapped(ThesaurusDraft),
}

/// Record could not be read
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("Malformed source record: {0}")]
    Source(#[from] SourceError),
}

/// One organization's mapping profile
pub trait RecordMapper: Send + Sync {
    /// Provenance written on every record this mapper produces
    fn provenance(&self) -> &'static str;

    fn map(&self, record: &SourceRecord) -> Result<MappedOutcome, MapError>;
}

/// Write sanitized literals into their language slots
///
/// Literals without a language tag or with empty text are skipped, so the
/// slot keeps its sentinel. Tags outside the supported set are ignored.
pub(crate) fn fill_language_slots(
    slots: &mut LanguageSlots,
    literals: Vec<TaggedLiteral<'_>>,
    field: &str,
) {
    for literal in literals {
        let (Some(tag), Some(text)) = (literal.language, literal.value) else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        match tag.parse::<Language>() {
            Ok(language) => slots.set(language, strip_markup(text)),
            Err(_) => {
                tracing::debug!(field, language = tag, "Ignoring unsupported language");
            }
        }
    }
}
