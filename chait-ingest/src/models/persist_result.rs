//! Persistence gateway results

use serde::{Deserialize, Serialize};

/// What the upsert did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistOperation {
    /// No row existed for the puri before the upsert
    Inserted,
    /// An existing row was overwritten
    Updated,
}

/// Diagnostic context attached to a failed persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub puri: String,
}

/// Outcome of one gateway upsert; failures are values, never panics or `Err`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<PersistOperation>,
    pub puri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorContext>,
}

impl PersistResult {
    pub fn succeeded(puri: impl Into<String>, operation: PersistOperation) -> Self {
        Self {
            success: true,
            operation: Some(operation),
            puri: puri.into(),
            error: None,
            error_details: None,
        }
    }

    pub fn failed(context: ErrorContext) -> Self {
        Self {
            success: false,
            operation: None,
            puri: context.puri.clone(),
            error: Some(context.message.clone()),
            error_details: Some(context),
        }
    }
}
