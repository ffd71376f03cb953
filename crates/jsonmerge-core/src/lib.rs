//! # jsonmerge-core
//!
//! Configurable recursive merging and path-reporting deep equality for
//! JSON-like trees.
//!
//! Merging layers a *modified* tree over an *original* one, the way a
//! settings override file is layered over defaults. Arrays, explicit nulls and
//! property removal are governed by [`MergeOptions`]. The equality checker
//! reports the first point of divergence as a path plus a message instead of
//! a bare boolean.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonmerge_core::{deep_equals, merge, ArrayMergeStrategy, MergeOptions, Value};
//!
//! let defaults: Value = r#"{"name":"svc","tags":["a"],"log":{"level":"info"}}"#.parse().unwrap();
//! let overlay: Value = r#"{"tags":["b"],"log":{"level":"debug"}}"#.parse().unwrap();
//!
//! let options = MergeOptions::default().with_array_strategy(ArrayMergeStrategy::Append);
//! let merged = merge(&defaults, &overlay, &options).unwrap();
//!
//! let expected: Value = r#"{"name":"svc","tags":["a","b"],"log":{"level":"debug"}}"#.parse().unwrap();
//! assert!(deep_equals(&expected, &merged).is_ok());
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value` tree model, including the in-memory `Undefined` marker
//! - [`options`] — `MergeOptions` and the array / null strategies
//! - [`merge`] — the merge engine, `fold_merge` and `merge_str`
//! - [`equality`] — `deep_equals` and its `EqualityError` diagnostic
//! - [`document`] — reading documents that carry comments or trailing commas
//! - [`typed`] — merging serde-serializable types
//! - [`error`] — error types for merge failures

pub mod document;
pub mod equality;
pub mod error;
pub mod merge;
pub mod options;
pub mod typed;
pub mod value;

pub use document::{parse_document, ReadOptions};
pub use equality::{deep_equals, is_deep_equal, EqualityError, Mismatch, PathSegment};
pub use error::{MergeError, Result};
pub use merge::{fold_merge, merge, merge_str};
pub use options::{
    ArrayMergeStrategy, MergeOptions, NullValueStrategy, DEFAULT_MAX_DEPTH, DEFAULT_UNSET_KEYWORD,
};
pub use typed::{merge_into, merge_to_value, merge_typed};
pub use value::{Map, Value, ValueKind};
