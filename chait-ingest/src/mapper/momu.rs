//! MoMU (Europeana Fashion thesaurus) mapping profile

use super::{fill_language_slots, MapError, MappedOutcome, RecordMapper, SkipReason};
use crate::models::ThesaurusDraft;
use crate::source::SourceRecord;

pub const MOMU_PROVENANCE: &str = "MoMU";

/// Namespace every MoMU concept URI lives under
const THESAURUS_NAMESPACE: &str = "http://thesaurus.europeanafashion.eu";

/// Path marker of concept resources within the thesaurus
const CONCEPT_MARKER: &str = "idc";

const AAT_MARKER: &str = "aat";
const WIKIDATA_MARKER: &str = "wikidata";

/// Maps Europeana Fashion thesaurus exports supplied by MoMU
#[derive(Debug, Clone, Copy, Default)]
pub struct MomuMapper;

impl MomuMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn is_concept_uri(uri: &str) -> bool {
        uri.contains(THESAURUS_NAMESPACE) && uri.contains(CONCEPT_MARKER)
    }
}

impl RecordMapper for MomuMapper {
    fn provenance(&self) -> &'static str {
        MOMU_PROVENANCE
    }

    fn map(&self, record: &SourceRecord) -> Result<MappedOutcome, MapError> {
        let Some(puri) = record.id()? else {
            return Ok(MappedOutcome::Skipped {
                reason: SkipReason::MissingId,
                id: None,
            });
        };

        if !Self::is_concept_uri(puri) {
            return Ok(MappedOutcome::Skipped {
                reason: SkipReason::InvalidUri,
                id: Some(puri.to_string()),
            });
        }

        let mut draft = ThesaurusDraft::new(MOMU_PROVENANCE, puri);
        draft.identifier = record.identifier()?;
        draft.modified_at = record.modified()?;

        fill_language_slots(&mut draft.labels, record.pref_labels()?, "label");
        fill_language_slots(&mut draft.scopes, record.scope_notes()?, "scope");

        // Last matching link of each kind wins
        for target in record.exact_matches()? {
            if target.contains(AAT_MARKER) {
                draft.aat = Some(target.to_string());
            }
            if target.contains(WIKIDATA_MARKER) {
                draft.wikidata = Some(target.to_string());
            }
        }

        Ok(MappedOutcome::Mapped(draft))
    }
}
