//! Error types for Strata operations.
//!
//! This module provides the main error type [`StrataError`]. The layout
//! pipeline itself never fails; errors come from reading, parsing and
//! exporting around it.

use std::io;

use thiserror::Error;

/// The main error type for Strata operations.
///
/// # Diagnostic Variants
///
/// The `Model` variant keeps the document source next to the deserializer
/// error, so callers can render the offending span.
#[derive(Debug, Error)]
pub enum StrataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Model { err: toml::de::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for StrataError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl StrataError {
    /// Create a new `Model` error with the associated document source.
    pub fn new_model_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Model {
            err,
            src: src.into(),
        }
    }
}
