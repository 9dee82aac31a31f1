//! Export of composed layouts.
//!
//! This module provides the [`Exporter`] trait, the last stage of the Strata
//! pipeline. The layout engine stays format-agnostic: an exporter turns a
//! [`DiagramLayout`] into whatever a renderer consumes.
//!
//! # Pipeline Position
//!
//! ```text
//! Model
//!     ↓ structure (containment scopes, layout graphs)
//! Scope layouts
//!     ↓ compose
//! DiagramLayout
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`json`]: JSON output via [`json::JsonExporter`]

/// JSON export backend.
pub mod json;

use thiserror::Error;

use crate::layout::DiagramLayout;

/// Abstraction for layout export backends.
pub trait Exporter {
    /// Exports a composed layout to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_layout(&mut self, layout: &DiagramLayout) -> Result<(), Error>;
}

/// Errors that can occur during export.
///
/// Converted into [`StrataError::Export`] at the crate boundary.
///
/// [`StrataError::Export`]: crate::StrataError::Export
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.into())
        } else {
            Self::Render(err.to_string())
        }
    }
}
