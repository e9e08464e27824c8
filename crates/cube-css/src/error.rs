//! Error types for stylesheet generation.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Only structural problems surface as errors. A missing token group or a
//! class token that no rule matches degrades to "no output" instead.

use thiserror::Error;

/// Errors that can occur while building a rule table or loading configuration
#[derive(Debug, Error)]
pub enum CssError {
    /// A pattern rule's regular expression failed to compile
    #[error("rule '{rule}' has an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// A pattern rule has fewer capture groups than its handler reads
    #[error("rule '{rule}' expects {expected} capture group(s) but its pattern only has {found}")]
    MissingCaptureGroups {
        rule: String,
        expected: usize,
        found: usize,
    },

    /// An exact rule was registered with an empty literal
    #[error("rule '{rule}' has an empty matcher")]
    EmptyMatcher { rule: String },

    /// A layer name that is not one of reset, base, components, default
    #[error("unknown cascade layer '{0}' (expected reset, base, components or default)")]
    UnknownLayer(String),

    /// Engine configuration could not be parsed
    #[error("invalid style configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}
