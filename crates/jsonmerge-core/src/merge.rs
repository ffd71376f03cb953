//! Recursive merge of an original tree with a modified tree.
//!
//! The modified side generally wins. Objects are merged key by key, arrays
//! according to [`ArrayMergeStrategy`], and anything else is replaced by the
//! modified value. Three signals on the modified side remove a property:
//! [`Value::Undefined`], the configured unset keyword, and `null` under
//! [`NullValueStrategy::Unset`].
//!
//! # Example
//! ```
//! use jsonmerge_core::{merge, MergeOptions, Value};
//!
//! let original: Value = r#"{"host":"localhost","port":8080,"debug":true}"#.parse().unwrap();
//! let modified: Value = r#"{"port":9090,"debug":"<unset>","tls":true}"#.parse().unwrap();
//! let merged = merge(&original, &modified, &MergeOptions::default()).unwrap();
//! assert_eq!(merged.to_string(), r#"{"host":"localhost","port":9090,"tls":true}"#);
//! ```

use tracing::{debug, trace};

use crate::error::{MergeError, Result};
use crate::options::{ArrayMergeStrategy, MergeOptions, NullValueStrategy};
use crate::value::{Map, Value};

/// Merge `modified` into `original`, producing a new tree. Neither input is
/// changed.
///
/// # Errors
///
/// - [`MergeError::ShapeMismatch`] unless both operands are objects or both
///   are arrays.
/// - [`MergeError::DepthExceeded`] when either operand nests deeper than
///   `options.max_depth()`.
/// - [`MergeError::Configuration`] when `options` fails validation.
pub fn merge(original: &Value, modified: &Value, options: &MergeOptions) -> Result<Value> {
    options.validate()?;
    debug!(
        array_strategy = %options.array_strategy(),
        null_strategy = %options.null_value_strategy(),
        max_depth = options.max_depth(),
        "merging {} with {}",
        original.kind(),
        modified.kind()
    );

    // Subtrees that are copied rather than merged still recurse in `clone`,
    // so both operands are bounded up front.
    if original.exceeds_depth(options.max_depth()) || modified.exceeds_depth(options.max_depth())
    {
        return Err(MergeError::DepthExceeded {
            max_depth: options.max_depth(),
        });
    }

    match (original, modified) {
        (Value::Object(original), Value::Object(modified)) => {
            merge_objects(original, modified, options, 1)
        }
        (Value::Array(original), Value::Array(modified)) => {
            merge_arrays(original, modified, options, 1)
        }
        _ => Err(MergeError::ShapeMismatch {
            original: original.kind(),
            modified: modified.kind(),
        }),
    }
}

/// Merge a sequence of values left to right: the first value seeds the result
/// and each later value is merged into it as the modified side.
///
/// A single value is returned as-is.
///
/// # Errors
///
/// [`MergeError::EmptyInput`] for an empty sequence, otherwise whatever the
/// first failing [`merge`] step returns.
pub fn fold_merge<I>(values: I, options: &MergeOptions) -> Result<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut values = values.into_iter();
    let seed = values.next().ok_or(MergeError::EmptyInput)?;
    let mut sources = 1usize;
    let merged = values.try_fold(seed, |acc, next| {
        sources += 1;
        merge(&acc, &next, options)
    })?;
    debug!(sources, "fold merge complete");
    Ok(merged)
}

/// Parse two JSON texts and merge them.
///
/// # Errors
///
/// [`MergeError::Json`] if either text is not valid JSON, otherwise as
/// [`merge`].
pub fn merge_str(original: &str, modified: &str, options: &MergeOptions) -> Result<Value> {
    let original: Value = original.parse()?;
    let modified: Value = modified.parse()?;
    merge(&original, &modified, options)
}

/// What to emit for a slot whose modified value is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Leave the slot out of the result.
    Drop,
    /// Emit the original value unchanged.
    KeepOriginal,
    /// Emit `null`.
    SetNull,
    /// Combine original and modified via [`merge_values`].
    Combine,
}

fn resolve_slot(modified: &Value, options: &MergeOptions) -> Slot {
    match modified {
        Value::Undefined => Slot::Drop,
        Value::Null => match options.null_value_strategy() {
            NullValueStrategy::Set => Slot::SetNull,
            NullValueStrategy::Ignore => Slot::KeepOriginal,
            NullValueStrategy::Unset => Slot::Drop,
        },
        Value::String(s) if s == options.unset_keyword() => Slot::Drop,
        _ => Slot::Combine,
    }
}

fn check_depth(depth: usize, options: &MergeOptions) -> Result<()> {
    if depth > options.max_depth() {
        return Err(MergeError::DepthExceeded {
            max_depth: options.max_depth(),
        });
    }
    Ok(())
}

/// Containers of the same kind recurse; any other pairing takes `modified`.
fn merge_values(
    original: &Value,
    modified: &Value,
    options: &MergeOptions,
    depth: usize,
) -> Result<Value> {
    match (original, modified) {
        (Value::Object(original), Value::Object(modified)) => {
            merge_objects(original, modified, options, depth + 1)
        }
        (Value::Array(original), Value::Array(modified)) => {
            merge_arrays(original, modified, options, depth + 1)
        }
        _ => Ok(modified.clone()),
    }
}

/// Surviving original keys come first in original order, followed by keys
/// only the modified side has, in modified order.
fn merge_objects(
    original: &Map,
    modified: &Map,
    options: &MergeOptions,
    depth: usize,
) -> Result<Value> {
    check_depth(depth, options)?;
    let mut result = Map::with_capacity(original.len().max(modified.len()));

    for (key, original_value) in original {
        let Some(modified_value) = modified.get(key) else {
            result.insert(key.clone(), original_value.clone());
            continue;
        };
        match resolve_slot(modified_value, options) {
            Slot::Drop => {}
            Slot::KeepOriginal => {
                result.insert(key.clone(), original_value.clone());
            }
            Slot::SetNull => {
                result.insert(key.clone(), Value::Null);
            }
            Slot::Combine => {
                let merged = merge_values(original_value, modified_value, options, depth)?;
                result.insert(key.clone(), merged);
            }
        }
    }

    for (key, modified_value) in modified {
        if original.contains_key(key) {
            continue;
        }
        match modified_value {
            Value::Null | Value::Undefined => {
                if options.null_value_strategy() == NullValueStrategy::Set {
                    result.insert(key.clone(), Value::Null);
                }
            }
            _ => {
                result.insert(key.clone(), modified_value.clone());
            }
        }
    }

    Ok(Value::Object(result))
}

fn merge_arrays(
    original: &[Value],
    modified: &[Value],
    options: &MergeOptions,
    depth: usize,
) -> Result<Value> {
    check_depth(depth, options)?;
    let strategy = options.array_strategy();
    trace!(
        %strategy,
        original_len = original.len(),
        modified_len = modified.len(),
        depth,
        "merging arrays"
    );

    let items = match strategy {
        ArrayMergeStrategy::Replace => modified.to_vec(),
        ArrayMergeStrategy::Append => original.iter().chain(modified).cloned().collect(),
        ArrayMergeStrategy::Merge => merge_by_index(original, modified, options, depth)?,
    };
    Ok(Value::Array(items))
}

/// Pair elements by position. Where only one side has an element it is
/// copied through untouched.
fn merge_by_index(
    original: &[Value],
    modified: &[Value],
    options: &MergeOptions,
    depth: usize,
) -> Result<Vec<Value>> {
    let len = original.len().max(modified.len());
    let mut items = Vec::with_capacity(len);

    for index in 0..len {
        match (original.get(index), modified.get(index)) {
            (Some(original_item), None) => items.push(original_item.clone()),
            (None, Some(modified_item)) => items.push(modified_item.clone()),
            (Some(original_item), Some(modified_item)) => {
                match resolve_slot(modified_item, options) {
                    Slot::Drop => {}
                    Slot::KeepOriginal => items.push(original_item.clone()),
                    Slot::SetNull => items.push(Value::Null),
                    Slot::Combine => {
                        items.push(merge_values(original_item, modified_item, options, depth)?)
                    }
                }
            }
            (None, None) => {
                return Err(MergeError::InternalInvariant(format!(
                    "index {index} is past both arrays (lengths {} and {})",
                    original.len(),
                    modified.len()
                )));
            }
        }
    }

    Ok(items)
}
