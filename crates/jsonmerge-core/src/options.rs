//! Merge configuration: array and null strategies, the unset sentinel, and the
//! recursion limit.
//!
//! A `MergeOptions` value is immutable once built and can be shared by any
//! number of concurrent merges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MergeError, Result};

/// Sentinel string that removes a property when it is the modified value.
pub const DEFAULT_UNSET_KEYWORD: &str = "<unset>";

/// Default bound on object/array nesting during a merge.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How two arrays at the same path are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMergeStrategy {
    /// Original elements followed by modified elements.
    Append,
    /// Modified array wins outright.
    #[default]
    Replace,
    /// Pairwise by index, recursing into matching containers.
    Merge,
}

/// How an explicit `null` on the modified side is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullValueStrategy {
    /// Keep the original value; new null properties are not added.
    #[default]
    Ignore,
    /// Write `null` into the result.
    Set,
    /// Remove the property from the result.
    Unset,
}

impl ArrayMergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayMergeStrategy::Append => "append",
            ArrayMergeStrategy::Replace => "replace",
            ArrayMergeStrategy::Merge => "merge",
        }
    }
}

impl NullValueStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NullValueStrategy::Ignore => "ignore",
            NullValueStrategy::Set => "set",
            NullValueStrategy::Unset => "unset",
        }
    }
}

impl fmt::Display for ArrayMergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NullValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayMergeStrategy {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Append, Self::Replace, Self::Merge]
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                MergeError::Configuration(format!(
                    "unknown array strategy '{s}' (expected append, replace or merge)"
                ))
            })
    }
}

impl FromStr for NullValueStrategy {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Ignore, Self::Set, Self::Unset]
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                MergeError::Configuration(format!(
                    "unknown null value strategy '{s}' (expected ignore, set or unset)"
                ))
            })
    }
}

/// Immutable merge configuration.
///
/// ```
/// use jsonmerge_core::{ArrayMergeStrategy, MergeOptions, NullValueStrategy};
///
/// let options = MergeOptions::default()
///     .with_array_strategy(ArrayMergeStrategy::Append)
///     .with_null_strategy(NullValueStrategy::Set);
/// assert_eq!(options.unset_keyword(), "<unset>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MergeOptions {
    array_strategy: ArrayMergeStrategy,
    null_value_strategy: NullValueStrategy,
    unset_keyword: String,
    max_depth: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            array_strategy: ArrayMergeStrategy::default(),
            null_value_strategy: NullValueStrategy::default(),
            unset_keyword: DEFAULT_UNSET_KEYWORD.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MergeOptions {
    pub fn with_array_strategy(mut self, strategy: ArrayMergeStrategy) -> Self {
        self.array_strategy = strategy;
        self
    }

    pub fn with_null_strategy(mut self, strategy: NullValueStrategy) -> Self {
        self.null_value_strategy = strategy;
        self
    }

    pub fn with_unset_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.unset_keyword = keyword.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn array_strategy(&self) -> ArrayMergeStrategy {
        self.array_strategy
    }

    pub fn null_value_strategy(&self) -> NullValueStrategy {
        self.null_value_strategy
    }

    pub fn unset_keyword(&self) -> &str {
        &self.unset_keyword
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Load options from a JSON document such as
    /// `{"arrayStrategy": "merge", "nullValueStrategy": "unset"}`.
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Unknown fields, unknown strategy names, malformed JSON and a zero
    /// `maxDepth` are all reported as [`MergeError::Configuration`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: MergeOptions = serde_json::from_str(json)
            .map_err(|e| MergeError::Configuration(format!("invalid merge options: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Reject settings no merge can run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(MergeError::Configuration(
                "max depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_roundtrip_through_display() {
        for strategy in [
            ArrayMergeStrategy::Append,
            ArrayMergeStrategy::Replace,
            ArrayMergeStrategy::Merge,
        ] {
            assert_eq!(strategy.to_string().parse::<ArrayMergeStrategy>().unwrap(), strategy);
        }
        for strategy in [
            NullValueStrategy::Ignore,
            NullValueStrategy::Set,
            NullValueStrategy::Unset,
        ] {
            assert_eq!(strategy.to_string().parse::<NullValueStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn strategy_parsing_ignores_case() {
        assert_eq!(
            "Append".parse::<ArrayMergeStrategy>().unwrap(),
            ArrayMergeStrategy::Append
        );
        assert_eq!(
            "UNSET".parse::<NullValueStrategy>().unwrap(),
            NullValueStrategy::Unset
        );
    }

    #[test]
    fn zero_depth_is_rejected() {
        let err = MergeOptions::default().with_max_depth(0).validate().unwrap_err();
        assert!(matches!(err, MergeError::Configuration(_)));
    }
}
