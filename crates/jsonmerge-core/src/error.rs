//! Error types for merge and fold operations.
//!
//! Equality mismatches are not errors; see [`crate::equality::EqualityError`].

use crate::value::ValueKind;
use thiserror::Error;

/// Errors that can abort a merge, a fold, or the loading of merge options.
#[derive(Error, Debug)]
pub enum MergeError {
    /// The top-level operands are not both objects or both arrays.
    #[error("Cannot merge {original} with {modified}")]
    ShapeMismatch {
        original: ValueKind,
        modified: ValueKind,
    },

    /// An unrecognized strategy name or an invalid option value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An unreachable branch was reached. Always a bug.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// Input nesting went deeper than `MergeOptions::max_depth`.
    #[error("Maximum merge depth of {max_depth} exceeded")]
    DepthExceeded { max_depth: usize },

    /// A fold was asked to combine zero values.
    #[error("No values to merge")]
    EmptyInput,

    /// JSON text could not be parsed, or a typed value could not be mapped
    /// to or from the tree model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text read with comments or trailing commas allowed was still not a
    /// valid document.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience alias used throughout jsonmerge-core.
pub type Result<T> = std::result::Result<T, MergeError>;
