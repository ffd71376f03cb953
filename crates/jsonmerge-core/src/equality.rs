//! Structural deep equality with a path to the first difference.
//!
//! The comparison is one-directional for objects: every property of the
//! *first* value must exist and match in the second, but properties that only
//! the second value has are never looked at. `deep_equals(a, b)` therefore
//! answers "does `b` still contain everything `a` has".
//!
//! Arrays must have the same length and match position by position. Strings
//! and numbers compare by their text, so `1` and `1.0` differ.
//!
//! The walk keeps its own stack instead of recursing, and each pending frame
//! owns the path that leads to it. Deeply nested input cannot overflow the
//! call stack and the visiting order is the same depth-first, first-operand
//! order a recursive walk would use.

use std::fmt;

use crate::value::Value;

/// One step in the path to a mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Why two values were found to differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mismatch {
    DifferentKinds,
    MissingProperty,
    DifferInSize,
    ValuesDiffer,
}

impl Mismatch {
    pub fn message(&self) -> &'static str {
        match self {
            Mismatch::DifferentKinds => "different value kinds",
            Mismatch::MissingProperty => "missing property in second",
            Mismatch::DifferInSize => "differ in size",
            Mismatch::ValuesDiffer => "values differ",
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The first point at which two values diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityError {
    path: Vec<PathSegment>,
    mismatch: Mismatch,
}

impl EqualityError {
    fn new(path: Vec<PathSegment>, mismatch: Mismatch) -> Self {
        Self { path, mismatch }
    }

    /// Segments from the root to the mismatch. Empty when the roots differ.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn mismatch(&self) -> Mismatch {
        self.mismatch
    }

    pub fn message(&self) -> &'static str {
        self.mismatch.message()
    }

    /// Segments joined with `.`, e.g. `servers.[1].port`. The root is `$`.
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            return "$".to_string();
        }
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for EqualityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.mismatch, self.path_string())
    }
}

impl std::error::Error for EqualityError {}

/// A comparison still to be made. `second` is `None` when the first value's
/// property has no counterpart; the miss is then reported at the owning
/// object's path.
struct Frame<'a> {
    first: &'a Value,
    second: Option<&'a Value>,
    path: Vec<PathSegment>,
}

fn child_path(path: &[PathSegment], segment: PathSegment) -> Vec<PathSegment> {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(segment);
    child
}

/// Compare two values, stopping at the first difference.
///
/// # Examples
///
/// ```
/// use jsonmerge_core::{deep_equals, Value};
///
/// let first: Value = r#"{"a":{"b":[1,2]}}"#.parse().unwrap();
/// let second: Value = r#"{"a":{"b":[1,3]}}"#.parse().unwrap();
/// let err = deep_equals(&first, &second).unwrap_err();
/// assert_eq!(err.to_string(), "values differ at a.b.[1]");
/// ```
pub fn deep_equals(first: &Value, second: &Value) -> Result<(), EqualityError> {
    let mut pending = vec![Frame {
        first,
        second: Some(second),
        path: Vec::new(),
    }];

    while let Some(Frame {
        first,
        second,
        path,
    }) = pending.pop()
    {
        let Some(second) = second else {
            let mut parent = path;
            parent.pop();
            return Err(EqualityError::new(parent, Mismatch::MissingProperty));
        };
        if first.kind() != second.kind() {
            return Err(EqualityError::new(path, Mismatch::DifferentKinds));
        }

        match (first, second) {
            (Value::Object(first_map), Value::Object(second_map)) => {
                // Reversed so the first property is popped first.
                for (key, child) in first_map.iter().rev() {
                    pending.push(Frame {
                        first: child,
                        second: second_map.get(key),
                        path: child_path(&path, PathSegment::Key(key.clone())),
                    });
                }
            }
            (Value::Array(first_items), Value::Array(second_items)) => {
                if first_items.len() != second_items.len() {
                    return Err(EqualityError::new(path, Mismatch::DifferInSize));
                }
                for (index, (child, other)) in
                    first_items.iter().zip(second_items).enumerate().rev()
                {
                    pending.push(Frame {
                        first: child,
                        second: Some(other),
                        path: child_path(&path, PathSegment::Index(index)),
                    });
                }
            }
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => {}
            // true and false are distinct kinds as far as diagnostics go.
            (Value::Bool(a), Value::Bool(b)) => {
                if a != b {
                    return Err(EqualityError::new(path, Mismatch::DifferentKinds));
                }
            }
            (Value::String(a), Value::String(b)) => {
                if a != b {
                    return Err(EqualityError::new(path, Mismatch::ValuesDiffer));
                }
            }
            (Value::Number(a), Value::Number(b)) => {
                if a.to_string() != b.to_string() {
                    return Err(EqualityError::new(path, Mismatch::ValuesDiffer));
                }
            }
            _ => return Err(EqualityError::new(path, Mismatch::DifferentKinds)),
        }
    }

    Ok(())
}

/// Boolean form of [`deep_equals`].
pub fn is_deep_equal(first: &Value, second: &Value) -> bool {
    deep_equals(first, second).is_ok()
}
