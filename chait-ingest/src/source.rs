//! Typed view over a provider JSON-LD record
//!
//! Records arrive in expanded JSON-LD form: an object keyed by full
//! predicate URIs whose values are arrays of `{"@value", "@language"}` or
//! `{"@id"}` nodes. Only the fixed predicate set below is ever read, and all
//! string-keyed lookups stay inside this module.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Predicate URIs consumed by the mappers
pub mod predicates {
    pub const ID: &str = "@id";
    pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
    pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    pub const SCOPE_NOTE: &str = "http://www.w3.org/2004/02/skos/core#scopeNote";
    pub const EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";
}

const VALUE_KEY: &str = "@value";
const LANGUAGE_KEY: &str = "@language";

/// Shape errors in a source record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("{predicate}: expected {expected}, found {found}")]
    UnexpectedShape {
        predicate: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A language-tagged literal from a label or note predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLiteral<'a> {
    pub language: Option<&'a str>,
    pub value: Option<&'a str>,
}

/// One provider record, kept as raw JSON
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SourceRecord(Value);

impl SourceRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Identity URI; `None` when absent, null or empty
    pub fn id(&self) -> Result<Option<&str>, SourceError> {
        match self.0.get(predicates::ID) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(unexpected(predicates::ID, "string", other)),
        }
    }

    /// Provider-local identifier (first `dcterms:identifier` literal)
    pub fn identifier(&self) -> Result<Option<String>, SourceError> {
        self.first_literal(predicates::IDENTIFIER)
    }

    /// Last-modified timestamp claimed by the provider
    pub fn modified(&self) -> Result<Option<String>, SourceError> {
        self.first_literal(predicates::MODIFIED)
    }

    pub fn pref_labels(&self) -> Result<Vec<TaggedLiteral<'_>>, SourceError> {
        self.tagged_literals(predicates::PREF_LABEL)
    }

    pub fn scope_notes(&self) -> Result<Vec<TaggedLiteral<'_>>, SourceError> {
        self.tagged_literals(predicates::SCOPE_NOTE)
    }

    /// Target URIs of `skos:exactMatch` links, in source order
    pub fn exact_matches(&self) -> Result<Vec<&str>, SourceError> {
        self.nodes(predicates::EXACT_MATCH)
            .map(|node| match node.get(predicates::ID) {
                Some(Value::String(id)) => Ok(id.as_str()),
                Some(other) => Err(unexpected(predicates::EXACT_MATCH, "@id string", other)),
                None => Err(unexpected(predicates::EXACT_MATCH, "@id string", node)),
            })
            .collect()
    }

    /// Nodes of a predicate: array elements, or a lone object
    fn nodes<'a>(&'a self, predicate: &str) -> Box<dyn Iterator<Item = &'a Value> + 'a> {
        match self.0.get(predicate) {
            Some(Value::Array(items)) => Box::new(items.iter()),
            Some(node @ Value::Object(_)) => Box::new(std::iter::once(node)),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn first_literal(&self, predicate: &str) -> Result<Option<String>, SourceError> {
        match self.nodes(predicate).next() {
            Some(node) => literal_text(predicate, node.get(VALUE_KEY)),
            None => Ok(None),
        }
    }

    fn tagged_literals(&self, predicate: &str) -> Result<Vec<TaggedLiteral<'_>>, SourceError> {
        self.nodes(predicate)
            .map(|node| {
                let language = match node.get(LANGUAGE_KEY) {
                    None | Some(Value::Null) => None,
                    Some(Value::String(tag)) => Some(tag.as_str()),
                    Some(other) => return Err(unexpected(predicate, "language tag", other)),
                };
                let value = match node.get(VALUE_KEY) {
                    None | Some(Value::Null) => None,
                    Some(Value::String(text)) => Some(text.as_str()),
                    Some(other) => return Err(unexpected(predicate, "string literal", other)),
                };
                Ok(TaggedLiteral { language, value })
            })
            .collect()
    }
}

impl From<Value> for SourceRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Literal as text; numbers and booleans are rendered, structures rejected
fn literal_text(predicate: &str, value: Option<&Value>) -> Result<Option<String>, SourceError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(unexpected(predicate, "literal", other)),
    }
}

fn unexpected(predicate: &str, expected: &'static str, found: &Value) -> SourceError {
    SourceError::UnexpectedShape {
        predicate: predicate.to_string(),
        expected,
        found: kind_of(found),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
