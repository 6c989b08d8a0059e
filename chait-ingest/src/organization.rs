//! Supported data providers

use crate::error::IngestError;
use std::fmt;
use std::str::FromStr;

/// Organization whose export is being ingested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Organization {
    /// ModeMuseum Antwerpen (Europeana Fashion thesaurus)
    Momu,
}

impl Organization {
    pub const VALID: [Organization; 1] = [Organization::Momu];

    /// Name accepted on the command line (matched case-insensitively)
    pub fn name(self) -> &'static str {
        match self {
            Organization::Momu => "MOMU",
        }
    }

    /// Comma-separated list of accepted names
    pub fn valid_names() -> String {
        Self::VALID
            .iter()
            .map(|org| org.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Organization {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::VALID
            .into_iter()
            .find(|org| org.name() == wanted)
            .ok_or_else(|| IngestError::InvalidOrganization(Self::valid_names()))
    }
}
