//! Error types for ERD operations.
//!
//! This module provides the main error type [`ErdError`] which wraps the
//! error conditions that can occur while laying out and rendering a diagram.

use thiserror::Error;

use erd_core::style::StyleError;

use crate::layering::LayeringError;

/// The main error type for ERD operations.
///
/// A render call either returns a complete SVG document or one of these
/// errors; no partial output is produced.
#[derive(Debug, Error)]
pub enum ErdError {
    /// A model named by the layering is missing from the input collection.
    #[error("unable to find model `{model}`")]
    NotFound { model: String },

    #[error("Layering error: {0}")]
    Layering(#[from] LayeringError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),
}
