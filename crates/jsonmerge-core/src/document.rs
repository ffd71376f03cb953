//! Loading documents from text, optionally tolerating comments and trailing
//! commas the way hand-edited settings files often carry them.
//!
//! With both allowances off the text goes through `serde_json` unchanged.
//! Otherwise it is read by `jsonc-parser`, which still rejects every other
//! JSON5 extension (unquoted keys and the like).

use jsonc_parser::ParseOptions;
use tracing::trace;

use crate::error::{MergeError, Result};
use crate::value::Value;

/// What the document reader tolerates beyond strict JSON. Strict by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    allow_comments: bool,
    allow_trailing_commas: bool,
}

impl ReadOptions {
    /// Accept both `//` line comments and `/* */` block comments, and trailing
    /// commas in objects and arrays.
    pub fn lenient() -> Self {
        Self {
            allow_comments: true,
            allow_trailing_commas: true,
        }
    }

    pub fn with_comments(mut self, allow: bool) -> Self {
        self.allow_comments = allow;
        self
    }

    pub fn with_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }

    pub fn allows_comments(&self) -> bool {
        self.allow_comments
    }

    pub fn allows_trailing_commas(&self) -> bool {
        self.allow_trailing_commas
    }

    fn is_strict(&self) -> bool {
        !self.allow_comments && !self.allow_trailing_commas
    }
}

/// Parse one document under `options`.
///
/// # Errors
///
/// - [`MergeError::Json`] for malformed text in strict mode.
/// - [`MergeError::Parse`] for malformed text in lenient mode, or text that
///   holds nothing but whitespace and comments.
///
/// # Examples
///
/// ```
/// use jsonmerge_core::{parse_document, ReadOptions};
///
/// let text = "{\n  // listen port\n  \"port\": 8080,\n}";
/// assert!(parse_document(text, &ReadOptions::default()).is_err());
///
/// let value = parse_document(text, &ReadOptions::lenient()).unwrap();
/// assert_eq!(value.to_string(), r#"{"port":8080}"#);
/// ```
pub fn parse_document(text: &str, options: &ReadOptions) -> Result<Value> {
    if options.is_strict() {
        return text.parse();
    }

    trace!(
        allow_comments = options.allow_comments,
        allow_trailing_commas = options.allow_trailing_commas,
        "lenient parse"
    );
    let parse_options = ParseOptions {
        allow_comments: options.allow_comments,
        allow_trailing_commas: options.allow_trailing_commas,
        allow_loose_object_property_names: false,
        ..Default::default()
    };
    match jsonc_parser::parse_to_serde_value(text, &parse_options) {
        Ok(Some(parsed)) => Ok(Value::from(parsed)),
        Ok(None) => Err(MergeError::Parse("document contains no value".to_string())),
        Err(err) => Err(MergeError::Parse(err.to_string())),
    }
}
