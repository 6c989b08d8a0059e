//! # CHAI-T Common Library
//!
//! Shared code for the CHAI-T thesaurus tooling:
//! - Normalized thesaurus record model and column limits
//! - Store configuration loading
//! - SQLite schema initialization
//! - Common error type

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::{ThesaurusRecord, UNAVAILABLE};
