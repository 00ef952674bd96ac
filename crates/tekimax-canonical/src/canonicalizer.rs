use canonical_json::to_string;
use serde::Serialize;
use serde_json::Value;

use std::fmt;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Provided value could not be turned into JSON.
    #[error("invalid JSON structure: {0}")]
    InvalidStructure(String),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Generic failure.
    #[error("other error: {0}")]
    Other(String),
}

/// Helper for building JSON paths in error messages.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits RFC 8785 (JCS) bytes.
///
/// Object members are sorted by key and no insignificant whitespace is
/// emitted, so two values with the same members always produce the same
/// bytes regardless of the order they were built in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer;

impl Canonicalizer {
    /// Creates a canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Produces canonical UTF-8 bytes for a JSON value.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        Ok(self.canonicalize_to_string(value)?.into_bytes())
    }

    /// Produces the canonical text for a JSON value.
    pub fn canonicalize_to_string(&self, value: &Value) -> Result<String, CanonicalizationError> {
        validate(value, Path::root())?;
        to_string(value).map_err(|err| CanonicalizationError::Other(err.to_string()))
    }

    /// Serializes any `Serialize` value and canonicalizes the result.
    pub fn canonicalize_serializable<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<String, CanonicalizationError> {
        let value = serde_json::to_value(value)
            .map_err(|err| CanonicalizationError::InvalidStructure(err.to_string()))?;
        self.canonicalize_to_string(&value)
    }

    /// Returns true if `text` is JSON that is already in canonical form.
    pub fn is_canonical(&self, text: &str) -> bool {
        let Ok(value) = serde_json::from_str::<Value>(text) else {
            return false;
        };
        matches!(self.canonicalize_to_string(&value), Ok(canonical) if canonical == text)
    }
}

/// Walks the value and rejects anything RFC 8785 cannot encode.
fn validate(value: &Value, path: Path) -> Result<(), CanonicalizationError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                validate(child, path.push_field(key))?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                validate(item, path.push_index(idx))?;
            }
            Ok(())
        }
        Value::Number(num) => match num.as_f64() {
            Some(f) if !f.is_finite() => Err(CanonicalizationError::NonFiniteNumber(path.to_string())),
            _ => Ok(()),
        },
        Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
    }
}
