//! Mapped record before normalization

use chait_common::UNAVAILABLE;
use std::fmt;
use std::str::FromStr;

/// Languages with a label/scope column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Nl,
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Nl, Language::Fr, Language::En];

    /// Uppercase code used in column names
    pub fn code(self) -> &'static str {
        match self {
            Language::Nl => "NL",
            Language::Fr => "FR",
            Language::En => "EN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Case-insensitive match on the whole tag (`en`, `EN`); `en-GB` is not `EN`
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(tag))
            .ok_or_else(|| format!("Unsupported language tag: {}", tag))
    }
}

/// One text slot per supported language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSlots {
    pub nl: String,
    pub fr: String,
    pub en: String,
}

impl LanguageSlots {
    /// All slots set to the "no data supplied" sentinel
    pub fn unavailable() -> Self {
        Self {
            nl: UNAVAILABLE.to_string(),
            fr: UNAVAILABLE.to_string(),
            en: UNAVAILABLE.to_string(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Nl => &self.nl,
            Language::Fr => &self.fr,
            Language::En => &self.en,
        }
    }

    pub fn set(&mut self, language: Language, text: String) {
        let slot = match language {
            Language::Nl => &mut self.nl,
            Language::Fr => &mut self.fr,
            Language::En => &mut self.en,
        };
        *slot = text;
    }
}

impl Default for LanguageSlots {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Output of a record mapper, input of the persistence gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThesaurusDraft {
    pub provenance: String,
    pub puri: String,
    pub identifier: Option<String>,
    pub modified_at: Option<String>,
    pub labels: LanguageSlots,
    pub scopes: LanguageSlots,
    pub aat: Option<String>,
    pub wikidata: Option<String>,
}

impl ThesaurusDraft {
    /// Draft with sentinel text slots and no optional fields
    pub fn new(provenance: impl Into<String>, puri: impl Into<String>) -> Self {
        Self {
            provenance: provenance.into(),
            puri: puri.into(),
            identifier: None,
            modified_at: None,
            labels: LanguageSlots::unavailable(),
            scopes: LanguageSlots::unavailable(),
            aat: None,
            wikidata: None,
        }
    }
}
