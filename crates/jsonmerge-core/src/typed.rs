//! Merging typed values through serde.
//!
//! Both operands are serialized into [`Value`] trees, merged with the usual
//! rules, and the result is deserialized into the requested type. A field
//! holding `None` serializes to `null`, so under the default
//! [`NullValueStrategy::Ignore`](crate::NullValueStrategy::Ignore) it leaves
//! the original field alone. That makes a struct of `Option`s usable as a
//! partial update.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::merge::merge;
use crate::options::MergeOptions;
use crate::value::Value;

/// Serialize both operands and merge the resulting trees.
///
/// # Errors
///
/// [`MergeError::Json`](crate::MergeError::Json) if either operand fails to
/// serialize, otherwise as [`merge`].
pub fn merge_to_value<A, B>(first: &A, second: &B, options: &MergeOptions) -> Result<Value>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    let first = Value::from(serde_json::to_value(first)?);
    let second = Value::from(serde_json::to_value(second)?);
    merge(&first, &second, options)
}

/// Merge two values of possibly different types into a third type.
///
/// # Examples
///
/// ```
/// use jsonmerge_core::{merge_into, MergeOptions};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct Defaults { host: String, port: u16 }
///
/// #[derive(Serialize)]
/// struct Override { port: u16 }
///
/// #[derive(Deserialize)]
/// struct Settings { host: String, port: u16 }
///
/// let defaults = Defaults { host: "localhost".into(), port: 80 };
/// let settings: Settings =
///     merge_into(&defaults, &Override { port: 8080 }, &MergeOptions::default()).unwrap();
/// assert_eq!((settings.host.as_str(), settings.port), ("localhost", 8080));
/// ```
///
/// # Errors
///
/// As [`merge_to_value`], plus [`MergeError::Json`](crate::MergeError::Json)
/// when the merged tree does not fit `T`.
pub fn merge_into<T, A, B>(first: &A, second: &B, options: &MergeOptions) -> Result<T>
where
    T: DeserializeOwned,
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    let merged = merge_to_value(first, second, options)?;
    Ok(serde_json::from_value(serde_json::Value::from(merged))?)
}

/// Merge two values of the same type.
///
/// # Errors
///
/// As [`merge_into`].
pub fn merge_typed<T>(first: &T, second: &T, options: &MergeOptions) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    merge_into(first, second, options)
}
