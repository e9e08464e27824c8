//! Error types for token loading.
//!
//! Copyright (c) 2025 Posit, PBC

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading token files or generating fluid values
#[derive(Debug, Error)]
pub enum TokenError {
    /// A token file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token file is not valid token JSON
    #[error("invalid token file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A fluid token is missing its `min` or `max` size
    #[error("fluid token '{name}' needs both min and max sizes")]
    MissingBounds { name: String },

    /// The viewport range is empty or inverted
    #[error("viewport max ({max}px) must be greater than min ({min}px)")]
    InvalidViewports { min: f64, max: f64 },
}
